//=========================================================================
// Game Loop
//=========================================================================
//
// Per-tick orchestration of window, input and scenes.
//
// One tick:
// ```text
//   window.clean(color)
//   begin_tick(stamp) → collect_frame() → handle_event()* → notify_resized()
//   scene_manager.update(delta, ctx)
//   scene_manager.render(window.display())
//   window.present()
//   → Exit if quit was requested
// ```
//
// The loop does not own timing: the caller measures `delta` and paces
// ticks (the winit platform uses `FrameLimiter`).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::context::GameContext;
use crate::core::input::TickStamp;
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};
use crate::core::scene::SceneManager;

//=== GameLoop ============================================================

/// Drives a [`SceneManager`] and a [`GameContext`] one tick at a time.
pub struct GameLoop<T> {
    scene_manager: SceneManager<T>,
    context: GameContext<T>,
    collector: EventCollector,
    tick: u64,
    origin: Instant,
}

impl<T: 'static> GameLoop<T> {
    /// Creates a loop fed by `receiver`.
    ///
    /// Returns `None` if no scene was started on `scene_manager`.
    pub fn new(
        scene_manager: SceneManager<T>,
        context: GameContext<T>,
        receiver: Receiver<PlatformEvent>,
    ) -> Option<Self> {
        if !scene_manager.has_active_scene() {
            return None;
        }

        info!(
            "Game loop ready (initial scene: {:?})",
            scene_manager.active_scene_name().unwrap_or_default()
        );

        Some(Self {
            scene_manager,
            context,
            collector: EventCollector::new(receiver),
            tick: 0,
            origin: Instant::now(),
        })
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one complete tick.
    ///
    /// A close request observed while collecting events does not cut the
    /// tick short: scenes still update and render, then `Exit` is returned.
    pub fn tick(&mut self, delta: f32) -> TickControl {
        let clean_color = self.context.config().clean_color;
        self.context.window.clean(clean_color);

        //--- Input ---------------------------------------------------------
        self.tick += 1;
        let stamp = TickStamp::new(self.tick, self.origin.elapsed().as_secs_f64());
        self.context.begin_tick(stamp);

        if self.collector.collect_frame() == TickControl::Exit {
            debug!("Window closed during tick {}", self.tick);
            self.context.quit();
        }
        for event in self.collector.events() {
            self.context.handle_event(event);
        }
        if let Some(size) = self.collector.resized() {
            self.context.window.notify_resized(size);
        }

        //--- Scenes --------------------------------------------------------
        self.scene_manager.update(delta, &mut self.context);
        self.scene_manager.render(self.context.window.display());
        self.context.window.present();

        if self.context.quit_requested() {
            info!("Game loop stopping after tick {}", self.tick);
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn context(&self) -> &GameContext<T> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext<T> {
        &mut self.context
    }

    pub fn scene_manager(&self) -> &SceneManager<T> {
        &self.scene_manager
    }

    pub fn scene_manager_mut(&mut self) -> &mut SceneManager<T> {
        &mut self.scene_manager
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
