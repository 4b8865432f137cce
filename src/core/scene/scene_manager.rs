//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, the active scene and the transition state
// machine.
//
// Transition phases (derived from two flags):
// ```text
//            change_scene()              on_exit_update() == true
//   Idle ─────────────────► Exiting ─────────────────────────► Entering
//    ▲                                   (swap to pending scene)   │
//    └─────────────────────────────────────────────────────────────┘
//                         on_enter_update() == true
// ```
//
// Only one transition can be in flight. Requests made while exiting or
// entering are dropped, never queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::registration::SceneRegistration;
use super::Scene;
use crate::core::context::GameContext;

//=== SceneCommand ========================================================

/// Request sent by a scene through its [`SceneManagerHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    /// Start a transition to the named scene.
    Change(String),

    /// Unregister the named scene.
    Remove(String),
}

//=== SceneManagerHandle ==================================================

/// Non-owning handle scenes use to drive the manager.
///
/// Commands are applied by the manager right after the update hook that
/// sent them returns, with the same rules as direct calls: a change
/// requested during a transition is dropped.
///
/// Commands sent anywhere else (from a render hook, or from a handle kept
/// outside the scenes) wait in the queue. They are applied on the next
/// [`SceneManager::update`], right after the active scene's `update`, so
/// that scene still runs one more plain update first.
#[derive(Debug, Clone)]
pub struct SceneManagerHandle {
    sender: Sender<SceneCommand>,
}

impl SceneManagerHandle {
    /// Requests a transition to `name`.
    pub fn change_scene(&self, name: impl Into<String>) {
        self.send(SceneCommand::Change(name.into()));
    }

    /// Requests that `name` be unregistered.
    pub fn remove_scene(&self, name: impl Into<String>) {
        self.send(SceneCommand::Remove(name.into()));
    }

    fn send(&self, command: SceneCommand) {
        if let Err(e) = self.sender.send(command) {
            debug!("Scene manager gone, dropping {:?}", e.into_inner());
        }
    }
}

//=== TransitionPhase =====================================================

/// Where the manager is in the transition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No transition in flight.
    Idle,

    /// The active scene is running its exit transition.
    Exiting,

    /// The active scene is running its enter transition.
    Entering,
}

//=== SceneManager ========================================================

/// Owns the active scene and switches between registered scenes.
///
/// Scenes are registered by name as factories. A scene instance lives
/// from the moment the manager switches to it until a transition away
/// from it completes; its state is not kept between activations.
///
/// # Example
///
/// ```rust
/// # use lumen_engine::prelude::*;
/// # use lumen_engine::core::scene::SceneRegistration;
/// let mut scenes = SceneManager::<()>::new();
/// scenes.add_scene("menu", SceneRegistration::of::<EmptyScene>());
///
/// assert!(scenes.change_scene("menu"));
/// assert_eq!(scenes.active_scene_name(), Some("menu"));
/// ```
pub struct SceneManager<T> {
    registry: HashMap<String, SceneRegistration<T>>,
    active_scene: Option<Box<dyn Scene<T>>>,
    active_scene_name: Option<String>,
    previous_scene_name: Option<String>,
    pending: Option<(String, SceneRegistration<T>)>,
    running_exit: bool,
    running_enter: bool,
    commands_tx: Sender<SceneCommand>,
    commands_rx: Receiver<SceneCommand>,
}

impl<T: 'static> SceneManager<T> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with no scenes registered.
    pub fn new() -> Self {
        let (commands_tx, commands_rx) = unbounded();
        Self {
            registry: HashMap::new(),
            active_scene: None,
            active_scene_name: None,
            previous_scene_name: None,
            pending: None,
            running_exit: false,
            running_enter: false,
            commands_tx,
            commands_rx,
        }
    }

    /// Handle for issuing commands from outside the manager.
    pub fn handle(&self) -> SceneManagerHandle {
        SceneManagerHandle {
            sender: self.commands_tx.clone(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene factory under `name`.
    ///
    /// Registering an existing name replaces the factory; a running
    /// instance of that scene is not affected.
    pub fn add_scene(&mut self, name: impl Into<String>, registration: SceneRegistration<T>) {
        let name = name.into();
        if self.registry.insert(name.clone(), registration).is_some() {
            warn!("Scene {name:?} was already registered and has been replaced");
        } else {
            debug!("Registered scene {name:?}");
        }
    }

    /// Unregisters `name`. Returns `false` if it was not registered.
    ///
    /// The running instance (if `name` is active) keeps running, and a
    /// pending switch to `name` still completes.
    pub fn remove_scene(&mut self, name: &str) -> bool {
        let removed = self.registry.remove(name).is_some();
        if removed {
            debug!("Unregistered scene {name:?}");
        }
        removed
    }

    pub fn has_scene(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Names of every registered scene.
    pub fn scenes_names(&self) -> HashSet<String> {
        self.registry.keys().cloned().collect()
    }

    //--- Transitions ------------------------------------------------------

    /// Starts a transition to `name`.
    ///
    /// The very first call instantiates the scene immediately and starts
    /// its enter transition. Later calls run the active scene's exit
    /// transition first.
    ///
    /// Returns `false` (and does nothing) if `name` is not registered or a
    /// transition is already in flight.
    pub fn change_scene(&mut self, name: &str) -> bool {
        if self.is_transitioning() {
            debug!("Dropping change to {name:?}: transition already in progress");
            return false;
        }
        let Some(registration) = self.registry.get(name).cloned() else {
            warn!("Attempted to change to unregistered scene {name:?}");
            return false;
        };

        if self.active_scene.is_none() {
            debug!("Starting with scene {name:?}");
            let scene = self.instantiate(registration);
            self.active_scene = Some(scene);
            self.active_scene_name = Some(name.to_owned());
            self.running_enter = true;
        } else {
            debug!(
                "Changing scene {:?} -> {name:?}",
                self.active_scene_name.as_deref().unwrap_or_default()
            );
            self.pending = Some((name.to_owned(), registration));
            self.running_exit = true;
        }
        true
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the active scene and any transition in flight.
    ///
    /// A scene entered during this call already receives its first
    /// `on_enter_update` in the same call.
    ///
    /// # Panics
    ///
    /// Panics if no scene was ever started with [`change_scene`](Self::change_scene).
    pub fn update(&mut self, delta: f32, context: &mut GameContext<T>) {
        self.scene_mut().update(delta, context);
        self.apply_commands();

        if self.running_exit {
            let finished = self.scene_mut().on_exit_update(delta, context);
            self.apply_commands();
            if finished {
                self.swap_to_pending();
            }
        }

        if self.running_enter {
            let finished = self.scene_mut().on_enter_update(delta, context);
            self.apply_commands();
            if finished {
                debug!(
                    "Scene {:?} entered",
                    self.active_scene_name.as_deref().unwrap_or_default()
                );
                self.running_enter = false;
            }
        }
    }

    /// Renders the active scene, then its transition overlay.
    ///
    /// # Panics
    ///
    /// Panics if no scene was ever started with [`change_scene`](Self::change_scene).
    pub fn render(&mut self, target: &mut T) {
        let (exiting, entering) = (self.running_exit, self.running_enter);
        let scene = self.scene_mut();

        scene.render(target);
        if exiting {
            scene.on_exit_render(target);
        } else if entering {
            scene.on_enter_render(target);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active_scene_name(&self) -> Option<&str> {
        self.active_scene_name.as_deref()
    }

    /// Scene that was active before the last completed swap.
    pub fn previous_scene_name(&self) -> Option<&str> {
        self.previous_scene_name.as_deref()
    }

    /// Target of the exit transition in flight.
    pub fn pending_scene_name(&self) -> Option<&str> {
        self.pending.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn phase(&self) -> TransitionPhase {
        if self.running_exit {
            TransitionPhase::Exiting
        } else if self.running_enter {
            TransitionPhase::Entering
        } else {
            TransitionPhase::Idle
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.running_exit || self.running_enter
    }

    /// `true` once a scene has been started.
    pub fn has_active_scene(&self) -> bool {
        self.active_scene.is_some()
    }

    //--- Internal Helpers -------------------------------------------------

    fn scene_mut(&mut self) -> &mut Box<dyn Scene<T>> {
        match self.active_scene.as_mut() {
            Some(scene) => scene,
            None => panic!("SceneManager used before any scene was started"),
        }
    }

    fn instantiate(&self, registration: SceneRegistration<T>) -> Box<dyn Scene<T>> {
        let mut scene = registration.instantiate();
        scene.attach_manager(self.handle());
        scene
    }

    fn swap_to_pending(&mut self) {
        self.running_exit = false;
        let Some((name, registration)) = self.pending.take() else {
            warn!("Exit transition finished without a pending scene");
            return;
        };

        // Outgoing scene is dropped before the incoming one is built
        self.active_scene = None;
        let scene = self.instantiate(registration);
        self.active_scene = Some(scene);

        debug!(
            "Swapped scene {:?} -> {name:?}",
            self.active_scene_name.as_deref().unwrap_or_default()
        );
        self.previous_scene_name = self.active_scene_name.replace(name);
        self.running_enter = true;
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.commands_rx.try_recv() {
            match command {
                SceneCommand::Change(name) => {
                    self.change_scene(&name);
                }
                SceneCommand::Remove(name) => {
                    self.remove_scene(&name);
                }
            }
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl<T: 'static> Default for SceneManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
