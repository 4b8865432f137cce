//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Stateful modifier tracking: Caches modifier state from ModifiersChanged
// events and applies to all subsequent key/mouse events. Unmapped keys
// (F13-F24, exotic keyboards) and OS key repeats are filtered (returns
// None): a held key is one activation, however long it is held.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::ElementState,
    event::{KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents with stateful modifier tracking.
///
/// Filters unmapped keys and applies cached modifier state to all events.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    #[cfg(test)]
    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key_code = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(self.create_key_input_event(key_code, key_event.state))
    }

    /// Converts Winit mouse button event to InputEvent (with modifiers).
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let mouse_button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown {
                button: mouse_button,
                modifiers: self.current_modifiers,
            },
            ElementState::Released => InputEvent::MouseButtonUp {
                button: mouse_button,
                modifiers: self.current_modifiers,
            },
        }
    }

    /// Creates a mouse move event (screen space, no modifiers).
    pub(crate) fn process_mouse_move(&self, x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    /// Creates a wheel event in lines (pixel deltas are converted).
    pub(crate) fn process_mouse_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        const PIXELS_PER_LINE: f64 = 20.0;

        let (x, y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x, y),
            MouseScrollDelta::PixelDelta(position) => (
                (position.x / PIXELS_PER_LINE) as f32,
                (position.y / PIXELS_PER_LINE) as f32,
            ),
        };
        InputEvent::MouseWheel { x, y }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown {
                key,
                modifiers: self.current_modifiers,
            },
            ElementState::Released => InputEvent::KeyUp {
                key,
                modifiers: self.current_modifiers,
            },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to engine Modifiers.
///
/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, F1-F12, arrows, modifiers and common special keys.
/// Unmapped keys (F13-F24, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Function Keys ------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft,
            ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft,
            AltRight => KeyCode::AltRight,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
///
/// Named buttons map one to one; anything else keeps its platform index.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(index) => MouseButton::Other(index),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn processor_with(modifiers: ModifiersState) -> InputProcessor {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(modifiers);
        processor
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn modifiers_start_released_and_follow_updates() {
        let mut processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);

        processor.update_modifiers(ModifiersState::SHIFT | ModifiersState::ALT);
        let mods = processor.current_modifiers();
        assert!(mods.shift && mods.alt && !mods.ctrl);

        processor.update_modifiers(ModifiersState::empty());
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn key_events_carry_cached_modifiers() {
        let processor = processor_with(ModifiersState::CONTROL);

        let down = processor.create_key_input_event(KeyCode::KeyS, ElementState::Pressed);
        let up = processor.create_key_input_event(KeyCode::KeyS, ElementState::Released);

        assert_eq!(down, InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL });
        assert_eq!(up, InputEvent::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::CTRL });
    }

    #[test]
    fn mouse_buttons_carry_cached_modifiers() {
        let processor = processor_with(ModifiersState::ALT);

        let event = processor.process_mouse_button(WinitMouseButton::Forward, ElementState::Pressed);

        assert_eq!(
            event,
            InputEvent::MouseButtonDown { button: MouseButton::Forward, modifiers: Modifiers::ALT }
        );
    }

    //=====================================================================
    // Conversion Tests
    //=====================================================================

    #[test]
    fn function_and_modifier_keys_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::F1), KeyCode::F1);
        assert_eq!(KeyCode::from(WinitKeyCode::F11), KeyCode::F11);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftLeft), KeyCode::ShiftLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::AltRight), KeyCode::AltRight);
    }

    #[test]
    fn keys_outside_the_engine_set_are_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad5), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_buttons_keep_platform_index() {
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Back);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }

    //=====================================================================
    // Pointer Tests
    //=====================================================================

    #[test]
    fn cursor_position_passes_through() {
        match InputProcessor::new().process_mouse_move(123.5, 456.75) {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (123.5, 456.75)),
            _ => panic!("Expected MouseMoved"),
        }
    }

    #[test]
    fn wheel_line_delta_passes_through() {
        let event = InputProcessor::new().process_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1.0));

        match event {
            InputEvent::MouseWheel { x, y } => assert_eq!((x, y), (0.0, -1.0)),
            _ => panic!("Expected MouseWheel"),
        }
    }

    #[test]
    fn wheel_pixel_delta_converted_to_lines() {
        let delta = MouseScrollDelta::PixelDelta(winit::dpi::PhysicalPosition::new(0.0, 40.0));

        match InputProcessor::new().process_mouse_wheel(delta) {
            InputEvent::MouseWheel { y, .. } => assert_eq!(y, 2.0),
            _ => panic!("Expected MouseWheel"),
        }
    }
}
