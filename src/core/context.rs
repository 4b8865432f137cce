//=========================================================================
// Game Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains the state scenes read and write every tick:
// - keyboard / mouse / joysticks: frame-accurate input trackers
// - window: the window backend (size, fullscreen, title)
// - quit flag, observed by the game loop at the end of the tick
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::GameConfig;
use crate::core::input::{InputEvent, JoystickHub, Keyboard, Mouse, TickStamp};
use crate::core::window::Window;

//=== GameContext =========================================================

/// Data accessible to scenes during `update`-type hooks.
///
/// `T` is the render target type of the window backend.
pub struct GameContext<T> {
    pub keyboard: Keyboard,
    pub mouse: Mouse,
    pub joysticks: JoystickHub,
    pub window: Box<dyn Window<Target = T>>,

    config: GameConfig,
    stamp: TickStamp,
    quit_requested: bool,
}

impl<T> GameContext<T> {
    /// Creates a context with empty input state at tick 0.
    pub fn new(config: GameConfig, window: Box<dyn Window<Target = T>>) -> Self {
        Self {
            keyboard: Keyboard::new(),
            mouse: Mouse::new(),
            joysticks: JoystickHub::new(),
            window,
            config,
            stamp: TickStamp::default(),
            quit_requested: false,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Stamp of the current tick.
    pub fn stamp(&self) -> TickStamp {
        self.stamp
    }

    /// Cursor position mapped onto the render target.
    pub fn scaled_mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse
            .scaled_position(self.window.current_size(), self.window.display_size())
    }

    //--- Lifecycle --------------------------------------------------------

    /// Asks the game loop to stop once the current tick completes.
    pub fn quit(&mut self) {
        if !self.quit_requested {
            info!("Quit requested");
        }
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    //--- Tick Processing --------------------------------------------------

    /// Advances every input device to `stamp`.
    ///
    /// Called by the game loop before the tick's events are applied.
    pub fn begin_tick(&mut self, stamp: TickStamp) {
        self.stamp = stamp;
        self.keyboard.begin_tick(stamp);
        self.mouse.begin_tick(stamp);
        self.joysticks.begin_tick(stamp);
    }

    /// Routes an input event to the device that owns it.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let handled = self.keyboard.handle_event(event)
            || self.mouse.handle_event(event)
            || self.joysticks.handle_event(event);
        if !handled {
            trace!("Ignoring input event {event:?}");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{Color, Size};
    use crate::core::input::{GamepadButton, InputQuery, KeyCode, Modifiers, MouseButton};

    //--- Test Helpers -----------------------------------------------------

    struct FixedWindow {
        target: (),
    }

    impl Window for FixedWindow {
        type Target = ();

        fn display(&mut self) -> &mut () {
            &mut self.target
        }
        fn clean(&mut self, _color: Color) {}
        fn present(&mut self) {}
        fn toggle_fullscreen(&mut self) -> bool {
            false
        }
        fn change_size(&mut self, _size: Size) -> bool {
            false
        }
        fn current_size(&self) -> Size {
            Size::new(800, 600)
        }
        fn display_size(&self) -> Size {
            Size::new(400, 300)
        }
        fn is_fullscreen(&self) -> bool {
            false
        }
        fn set_title(&mut self, _title: &str) {}
        fn notify_resized(&mut self, _size: Size) {}
    }

    fn context() -> GameContext<()> {
        GameContext::new(GameConfig::default(), Box::new(FixedWindow { target: () }))
    }

    //=====================================================================
    // Routing Tests
    //=====================================================================

    #[test]
    fn events_routed_to_devices() {
        let mut ctx = context();
        ctx.begin_tick(TickStamp::new(1, 0.0));

        ctx.handle_event(&InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::NONE });
        ctx.handle_event(&InputEvent::MouseButtonDown {
            button: MouseButton::Right,
            modifiers: Modifiers::NONE,
        });
        ctx.handle_event(&InputEvent::GamepadConnected { id: 0, name: String::from("Pad") });
        ctx.handle_event(&InputEvent::GamepadButtonDown { id: 0, button: GamepadButton::West });

        assert!(ctx.keyboard.just_pressed(KeyCode::KeyA));
        assert!(ctx.mouse.just_pressed(MouseButton::Right));
        assert!(ctx.joysticks.get(0).is_some_and(|pad| pad.just_pressed(GamepadButton::West)));
    }

    #[test]
    fn begin_tick_advances_all_devices() {
        let mut ctx = context();
        ctx.begin_tick(TickStamp::new(1, 0.0));
        ctx.handle_event(&InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE });

        ctx.begin_tick(TickStamp::new(2, 0.016));

        assert_eq!(ctx.stamp().tick, 2);
        assert!(!ctx.keyboard.just_pressed(KeyCode::Space));
        assert_eq!(ctx.keyboard.hold_ticks(KeyCode::Space), Some(1));
    }

    //=====================================================================
    // Misc Tests
    //=====================================================================

    #[test]
    fn quit_is_sticky() {
        let mut ctx = context();
        assert!(!ctx.quit_requested());

        ctx.quit();
        ctx.quit();
        assert!(ctx.quit_requested());
    }

    #[test]
    fn scaled_mouse_position_uses_window_sizes() {
        let mut ctx = context();
        ctx.handle_event(&InputEvent::MouseMoved { x: 200.0, y: 100.0 });

        assert_eq!(ctx.scaled_mouse_position(), Some((100.0, 50.0)));
    }
}
