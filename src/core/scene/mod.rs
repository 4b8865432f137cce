//=========================================================================
// Scene System
//=========================================================================
//
// Named scene factories and a single active scene with animated
// enter/exit transitions.
//
// Architecture:
//   SceneManager
//     ├─ registry: HashMap<String, SceneRegistration<T>>
//     ├─ active_scene: Option<Box<dyn Scene<T>>>
//     └─ commands: Receiver<SceneCommand>  ◄── SceneManagerHandle
//
// Flow (one tick):
//   update() → Scene::update() → [on_exit_update() → swap] → [on_enter_update()]
//   render() → Scene::render() → on_exit_render() | on_enter_render()
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;

//=== Module Declarations =================================================

mod registration;
mod scene_manager;

//=== Public API ==========================================================

pub use registration::SceneRegistration;
pub use scene_manager::{SceneCommand, SceneManager, SceneManagerHandle, TransitionPhase};

//=== Scene Trait =========================================================

/// Defines scene behavior with per-tick hooks and optional transitions.
///
/// `T` is the render target type of the window backend.
///
/// # Minimal Implementation
///
/// Only `update()` and `render()` are required. Transition hooks default
/// to finishing immediately:
///
/// ```rust
/// # use lumen_engine::prelude::*;
/// struct Title;
///
/// impl<T> Scene<T> for Title {
///     fn update(&mut self, _delta: f32, context: &mut GameContext<T>) {
///         if context.keyboard.just_pressed(KeyCode::Escape) {
///             context.quit();
///         }
///     }
///
///     fn render(&mut self, _target: &mut T) {}
/// }
/// ```
///
/// # Transitions
///
/// While the manager is switching scenes, the outgoing scene keeps
/// receiving `update`/`render` and additionally `on_exit_update` /
/// `on_exit_render` until `on_exit_update` returns `true`. The incoming
/// scene then gets `on_enter_update` / `on_enter_render` in the same way.
pub trait Scene<T> {
    /// Receives a handle to the owning manager.
    ///
    /// Called once, after construction and before the first `update`.
    fn attach_manager(&mut self, _manager: SceneManagerHandle) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, delta: f32, context: &mut GameContext<T>);

    /// Draws the scene.
    fn render(&mut self, target: &mut T);

    /// Advances the enter transition. Return `true` once finished.
    fn on_enter_update(&mut self, _delta: f32, _context: &mut GameContext<T>) -> bool {
        true
    }

    /// Advances the exit transition. Return `true` once finished.
    fn on_exit_update(&mut self, _delta: f32, _context: &mut GameContext<T>) -> bool {
        true
    }

    /// Draws over the scene while entering.
    fn on_enter_render(&mut self, _target: &mut T) {}

    /// Draws over the scene while exiting.
    fn on_exit_render(&mut self, _target: &mut T) {}
}

//=== EmptyScene ==========================================================

/// Scene that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl<T> Scene<T> for EmptyScene {
    fn update(&mut self, _delta: f32, _context: &mut GameContext<T>) {}

    fn render(&mut self, _target: &mut T) {}
}
