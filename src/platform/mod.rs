//=========================================================================
// Platform Subsystem
//
// Bridges winit (window, keyboard, mouse) and gilrs (gamepads) with the
// game loop through a crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────────────────┐
//  │  Winit Event Loop           gilrs (about_to_wait)         │
//  │   ↓                          ↓                            │
//  │  InputProcessor             GamepadSource                 │
//  │   ↓                          ↓                            │
//  │  InputBuffer  ◄──────────────┘                            │
//  │   ├─ discrete: Vec<>                                      │
//  │   ├─ continuous: HashSet<> (pointer)                      │
//  │   └─ axes: Vec<> (gamepad samples, in order)              │
//  │   ↓                                                       │
//  │  RedrawRequested                                          │
//  │   ↓ (flush)                                               │
//  │  Channel ──► GameLoop::tick ──► FrameLimiter::wait        │
//  └──────────────────────────────────────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent atomically
//    → One game tick runs on the same thread
//    → Empty buffers NOT sent
// ```
//
// Key Design Decisions:
// - **RedrawRequested = tick boundary**: every input received between two
//   redraws belongs to exactly one tick
// - **Sticky modifiers**: Modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **Close completes the tick**: `CloseRequested` bypasses the channel,
//   marks the context as quitting and runs one last tick right away, so
//   neither a full channel nor a hidden window can swallow it
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
// Responsibilities:
// - Create the OS window once the event loop is resumed
// - Convert Winit and gilrs types → engine InputEvents
// - Buffer input until the frame boundary
// - Drive the game loop and pace it to the target TPS
//
//=========================================================================

//=== Submodules ==========================================================

mod gamepad;
mod input_buffer;
mod input_processor;
mod winit_window;

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
};

//=== Internal Imports ====================================================

use crate::core::config::{GameConfig, Size};
use crate::core::context::GameContext;
use crate::core::frame_limiter::FrameLimiter;
use crate::core::game_loop::GameLoop;
use crate::core::platform_bridge::{EngineError, PlatformEvent, TickControl};
use crate::core::scene::SceneManager;
use gamepad::GamepadSource;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use winit_window::WinitWindow;

pub use winit_window::Surface;

//=== Platform ============================================================

/// Window owner, input aggregator and tick driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, scenes)`; nothing touches
///    the OS yet
/// 2. **Execution**: `platform.run()` starts the winit event loop
/// 3. **Resume**: the window is created and the [`GameLoop`] assembled
/// 4. **Frames**: every `RedrawRequested` flushes input and runs one tick
/// 5. **Shutdown**: the tick returns `Exit` (scene quit or window close)
///    → the event loop exits and `run()` returns
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    config: GameConfig,

    /// Handed over to the game loop on the first `resumed()`.
    scene_manager: Option<SceneManager<Surface>>,

    /// None until the window exists.
    game_loop: Option<GameLoop<Surface>>,

    /// Buffers discrete/continuous input until the frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,

    /// Moved into the game loop together with the scene manager.
    event_receiver: Option<Receiver<PlatformEvent>>,

    input_processor: InputProcessor,
    gamepads: Option<GamepadSource>,
    limiter: FrameLimiter,

    /// Set once the window was asked to close. Never goes through the
    /// channel.
    close_requested: bool,

    /// Fatal error raised inside the event loop, returned by `run()`.
    startup_error: Option<EngineError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform; the window is created lazily in `resumed()`.
    pub(crate) fn new(config: GameConfig, scene_manager: SceneManager<Surface>) -> Self {
        let (event_sender, event_receiver) = bounded(config.channel_capacity);
        let limiter = FrameLimiter::new(config.target_tps);

        info!(
            target: "platform",
            "Platform subsystem initialized (TPS: {:?}, channel: {})",
            config.target_tps,
            config.channel_capacity
        );

        Self {
            config,
            scene_manager: Some(scene_manager),
            game_loop: None,
            buffer: InputBuffer::new(),
            event_sender,
            event_receiver: Some(event_receiver),
            input_processor: InputProcessor::new(),
            gamepads: None,
            limiter,
            close_requested: false,
            startup_error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the game quits or the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the event loop cannot be created or
    /// fails, or if the window cannot be created.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub(crate) fn run(mut self) -> Result<(), EngineError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| EngineError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| EngineError::EventLoopExecution(e.to_string()))?;

        match self.startup_error.take() {
            Some(error) => Err(error),
            None => {
                info!(target: "platform", "Event loop finished");
                Ok(())
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Creates the window and assembles the game loop.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let window = WinitWindow::create(event_loop, &self.config.window)?;
        window.request_redraw();

        let (Some(scene_manager), Some(receiver)) =
            (self.scene_manager.take(), self.event_receiver.take())
        else {
            return Err(EngineError::NoActiveScene);
        };

        let context = GameContext::new(self.config.clone(), Box::new(window));
        self.game_loop = Some(
            GameLoop::new(scene_manager, context, receiver).ok_or(EngineError::NoActiveScene)?,
        );

        self.gamepads = GamepadSource::new();
        if let Some(gamepads) = &self.gamepads {
            for event in gamepads.initial_events() {
                self.buffer.push(event);
            }
        }

        // Window and scene setup must not count towards the first delta
        self.limiter.restart();
        Ok(())
    }

    /// Flushes buffered input events into the channel.
    ///
    /// Drains both discrete and continuous event buffers, sending them as a
    /// single [`PlatformEvent::Inputs`] message. Called on every
    /// `RedrawRequested` event. Empty buffers are not sent.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            self.send(PlatformEvent::Inputs { discrete, continuous });
        }
    }

    /// Queues an event for the next tick without blocking.
    ///
    /// The game loop drains the channel on the same thread, so a full
    /// channel means the event is dropped rather than waited on.
    fn send(&self, event: PlatformEvent) {
        match self.event_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(target: "platform", "Event channel full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(event)) => {
                warn!(target: "platform", "Event channel disconnected, dropping {:?}", event);
            }
        }
    }

    /// Marks the game as quitting without touching the event channel.
    ///
    /// The quit flag on the context is sticky, so the next tick runs to
    /// completion and then returns `Exit`.
    fn request_close(&mut self) {
        self.close_requested = true;
        if let Some(game_loop) = self.game_loop.as_mut() {
            game_loop.context_mut().quit();
        }
    }

    /// Runs one tick, then sleeps away the rest of the frame budget.
    fn run_tick(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();

        let Some(game_loop) = self.game_loop.as_mut() else {
            if self.close_requested {
                event_loop.exit();
            }
            return;
        };

        let delta = self.limiter.begin_frame();
        if game_loop.tick(delta) == TickControl::Exit {
            info!(target: "platform", "Exiting after tick {}", game_loop.tick_count());
            event_loop.exit();
            return;
        }
        self.limiter.wait();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game_loop.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.start(event_loop) {
            error!(target: "platform", "Startup failed: {}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.request_close();
                // Last tick now: a hidden window may never redraw again
                self.run_tick(event_loop);
            }

            WindowEvent::Resized(size) => {
                self.send(PlatformEvent::Resized(Size::new(size.width, size.height)));
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(
                    position.x as f32,
                    position.y as f32,
                );
                self.buffer.push_continuous(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input_processor.process_mouse_wheel(*delta);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => self.run_tick(event_loop),

            _ => {}
        }
    }

    /// Polls gamepads once per event loop iteration.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gamepads) = self.gamepads.as_mut() {
            gamepads.poll(&mut self.buffer);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};

    //--- Test Helpers -----------------------------------------------------

    fn platform(channel_capacity: usize) -> Platform {
        let mut config = GameConfig::default();
        config.channel_capacity = channel_capacity;
        Platform::new(config, SceneManager::new())
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn receiver(platform: &Platform) -> &Receiver<PlatformEvent> {
        platform.event_receiver.as_ref().expect("receiver not handed over yet")
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform(8);
        assert!(platform.game_loop.is_none(), "Game loop should be created lazily");
        assert!(platform.scene_manager.is_some());
        assert!(platform.startup_error.is_none());
    }

    #[test]
    fn frame_limiter_follows_config() {
        let platform = platform(8);
        assert!(platform.limiter.frame_duration().is_some());
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let mut platform = platform(8);

        platform.flush_input_buffer();

        assert!(receiver(&platform).try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let mut platform = platform(8);
        platform.buffer.push_discrete(key_down(KeyCode::Space));
        platform.buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 2.0 });

        platform.flush_input_buffer();

        match receiver(&platform).try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete.len(), 1, "Should have 1 discrete event");
                assert_eq!(continuous.len(), 1, "Should have 1 continuous event");
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let mut platform = platform(8);
        platform.buffer.push_discrete(key_down(KeyCode::KeyA));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(receiver(&platform).try_recv().is_ok(), "First flush should send");
        assert!(receiver(&platform).try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn full_channel_drops_inputs_instead_of_blocking() {
        let mut platform = platform(1);

        platform.send(PlatformEvent::Resized(Size::new(640, 480)));
        platform.buffer.push_discrete(key_down(KeyCode::KeyA));
        platform.flush_input_buffer();

        assert!(matches!(receiver(&platform).try_recv(), Ok(PlatformEvent::Resized(_))));
        assert!(receiver(&platform).try_recv().is_err());
    }

    //=====================================================================
    // Close Tests
    //=====================================================================

    #[test]
    fn close_request_survives_full_channel() {
        let mut platform = platform(2);
        platform.send(PlatformEvent::Resized(Size::new(640, 480)));
        platform.send(PlatformEvent::Resized(Size::new(641, 480)));
        assert!(receiver(&platform).is_full());

        platform.request_close();

        assert!(platform.close_requested);
        let queued: Vec<PlatformEvent> = receiver(&platform).try_iter().collect();
        assert_eq!(queued.len(), 2, "queued events are left untouched");
        assert!(queued.iter().all(|event| matches!(event, PlatformEvent::Resized(_))));
    }

    #[test]
    fn close_request_before_window_is_remembered() {
        let mut platform = platform(8);
        assert!(!platform.close_requested);

        platform.request_close();
        platform.request_close();

        assert!(platform.close_requested);
        assert!(receiver(&platform).is_empty());
    }

    #[test]
    fn send_handles_disconnected_channel() {
        let mut platform = platform(8);
        platform.event_receiver = None;

        // Should not panic, just log a warning
        platform.send(PlatformEvent::WindowClosed);
    }
}
