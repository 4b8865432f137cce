//=========================================================================
// Input Event Types
//
// Defines the engine-side representation of decoded input events.
//
// This module abstracts away platform-specific input (Winit, gilrs)
// into a unified format consumed by the keyboard, mouse and joystick
// trackers once per tick.
//
// Responsibilities:
// - Represent keyboard, mouse and gamepad inputs in a portable way
// - Provide equality and hashing semantics for event coalescing
// - Carry modifier key state (Shift, Ctrl, Alt)
//
// Event Flow:
// ```text
// Platform Layer (Winit / gilrs)
//         ↓
//    InputEvent (this module)
//         ↓
//    GameContext::handle_event()
//         ↓
//    Keyboard / Mouse / JoystickHub
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// `Other` carries the platform index of side buttons, macro buttons and
/// any non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Browser-style "back" side button.
    Back,

    /// Browser-style "forward" side button.
    Forward,

    /// Any other button, by platform index.
    Other(u16),
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== Gamepad Identifiers =================================================

/// Connected joystick identifier, assigned by the gamepad backend.
///
/// Identifiers are stable for a device while the process runs, so a
/// reconnected pad reuses its previous slot in the [`JoystickHub`].
///
/// [`JoystickHub`]: crate::core::input::JoystickHub
pub type JoystickId = usize;

/// Gamepad button, named by position (Xbox-style layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    North,
    West,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    Mode,
    LeftThumb,
    RightThumb,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,

    /// Button the backend could not name.
    Unknown,
}

/// Gamepad analog axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftZ,
    RightZ,
    DPadX,
    DPadY,

    /// Axis the backend could not name.
    Unknown,
}

//=== InputEvent ==========================================================

/// Decoded input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Discrete events compare by type + payload. Continuous events
/// (`MouseMoved`, `MouseWheel`, `GamepadAxisMoved`) compare by their
/// channel only, so a set of continuous events keeps the latest value
/// per channel.
///
/// ```text
/// KeyDown{A, CTRL}          == KeyDown{A, CTRL}            ✓
/// KeyDown{A, CTRL}          == KeyDown{A, SHIFT}           ✗
/// MouseMoved{..}            == MouseMoved{..}              ✓
/// GamepadAxisMoved{0, LX,..} == GamepadAxisMoved{0, LX,..} ✓
/// GamepadAxisMoved{0, LX,..} == GamepadAxisMoved{0, LY,..} ✗
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse button released.
    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse cursor moved to new position.
    ///
    /// Coordinates are in window space (pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Mouse wheel scrolled, in lines.
    MouseWheel { x: f32, y: f32 },

    /// A gamepad became available.
    GamepadConnected { id: JoystickId, name: String },

    /// A gamepad was unplugged or lost.
    GamepadDisconnected { id: JoystickId },

    /// Gamepad button pressed.
    GamepadButtonDown { id: JoystickId, button: GamepadButton },

    /// Gamepad button released.
    GamepadButtonUp { id: JoystickId, button: GamepadButton },

    /// Gamepad axis changed to a raw value in [-1, 1].
    GamepadAxisMoved {
        id: JoystickId,
        axis: GamepadAxis,
        value: f32,
    },

    /// Unrecognized or unsupported event, ignored by the trackers.
    Unidentified,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Whether the event samples a value rather than marking an edge.
    ///
    /// Pointer samples are coalesced per frame; axis samples are kept in
    /// order so dead-zone crossings survive.
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Self::MouseMoved { .. } | Self::MouseWheel { .. } | Self::GamepadAxisMoved { .. }
        )
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (GamepadConnected { id: a, name: na }, GamepadConnected { id: b, name: nb }) => {
                a == b && na == nb
            }
            (GamepadDisconnected { id: a }, GamepadDisconnected { id: b }) => a == b,
            (
                GamepadButtonDown { id: a, button: ba },
                GamepadButtonDown { id: b, button: bb },
            ) => a == b && ba == bb,
            (GamepadButtonUp { id: a, button: ba }, GamepadButtonUp { id: b, button: bb }) => {
                a == b && ba == bb
            }
            // Continuous channels: payload ignored
            (GamepadAxisMoved { id: a, axis: xa, .. }, GamepadAxisMoved { id: b, axis: xb, .. }) => {
                a == b && xa == xb
            }
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (MouseWheel { .. }, MouseWheel { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + identifying payload, consistent with equality.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::GamepadConnected { id, name } => {
                id.hash(state);
                name.hash(state);
            }
            Self::GamepadDisconnected { id } => id.hash(state),
            Self::GamepadButtonDown { id, button } | Self::GamepadButtonUp { id, button } => {
                id.hash(state);
                button.hash(state);
            }
            Self::GamepadAxisMoved { id, axis, .. } => {
                id.hash(state);
                axis.hash(state);
            }
            _ => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// The system does not distinguish between left/right variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
