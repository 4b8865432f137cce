//=========================================================================
// Input System
//=========================================================================
//
// Frame-accurate input tracking for keyboard, mouse and joysticks.
//
// Architecture:
// ```text
//   InputEvent ──► GameContext::handle_event()
//                    ├─► Keyboard    (InputTracker<KeyCode>)
//                    ├─► Mouse       (InputTracker<MouseButton> + snapshots)
//                    └─► JoystickHub (per pad: InputTracker + AxisTracker)
// ```
//
// Every device is advanced with the same `TickStamp` before the tick's
// events are applied, and all queries are answered through the shared
// `InputQuery` trait.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod joystick;
mod keyboard;
mod mouse;
mod record;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{
    GamepadAxis, GamepadButton, InputEvent, JoystickId, KeyCode, Modifiers, MouseButton,
};
pub use joystick::{Joystick, JoystickHub};
pub use keyboard::Keyboard;
pub use mouse::{Mouse, MouseMotion, MouseWheel};
pub use record::{AxisRecord, InputRecord, TickStamp};
pub use state_tracker::{AxisTracker, InputQuery, InputTracker, AXIS_DEAD_ZONE};
