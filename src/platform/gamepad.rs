//=========================================================================
// Gamepad Source
//=========================================================================
//
// Polls gilrs and converts its events into engine InputEvents.
//
// Architecture:
//   gilrs::Event → GamepadSource::poll → InputEvent → InputBuffer
//
// Buttons and connection changes are discrete; axis motion is continuous
// and every sample is kept in order by the buffer. Pads already plugged
// in when the engine starts are announced once through `initial_events`.
//
//=========================================================================

//=== External Dependencies ===============================================

use gilrs::{Axis, Button, EventType, Gilrs};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::input_buffer::InputBuffer;
use crate::core::input::event::{GamepadAxis, GamepadButton, InputEvent};

//=== GamepadSource =======================================================

pub(crate) struct GamepadSource {
    gilrs: Gilrs,
}

impl GamepadSource {
    /// Opens the gamepad backend, or `None` if the platform has none.
    pub(crate) fn new() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => Some(Self { gilrs }),
            Err(gilrs::Error::NotImplemented(gilrs)) => {
                warn!(target: "platform", "Gamepads not supported on this platform");
                Some(Self { gilrs })
            }
            Err(e) => {
                warn!(target: "platform", "Gamepad backend unavailable: {}", e);
                None
            }
        }
    }

    /// Connection events for pads present before the first poll.
    pub(crate) fn initial_events(&self) -> Vec<InputEvent> {
        self.gilrs
            .gamepads()
            .filter(|(_, pad)| pad.is_connected())
            .map(|(id, pad)| {
                info!(target: "platform", "Gamepad {} present: {}", usize::from(id), pad.name());
                InputEvent::GamepadConnected {
                    id: usize::from(id),
                    name: pad.name().to_string(),
                }
            })
            .collect()
    }

    /// Drains pending gilrs events into `buffer`.
    pub(crate) fn poll(&mut self, buffer: &mut InputBuffer) {
        while let Some(gilrs::Event { id, event, .. }) = self.gilrs.next_event() {
            let pad = usize::from(id);

            let input = match event {
                EventType::ButtonPressed(button, _) => InputEvent::GamepadButtonDown {
                    id: pad,
                    button: button.into(),
                },
                EventType::ButtonReleased(button, _) => InputEvent::GamepadButtonUp {
                    id: pad,
                    button: button.into(),
                },
                EventType::AxisChanged(axis, value, _) => InputEvent::GamepadAxisMoved {
                    id: pad,
                    axis: axis.into(),
                    value,
                },
                EventType::Connected => {
                    let name = self.gilrs.gamepad(id).name().to_string();
                    info!(target: "platform", "Gamepad {} connected: {}", pad, name);
                    InputEvent::GamepadConnected { id: pad, name }
                }
                EventType::Disconnected => {
                    info!(target: "platform", "Gamepad {} disconnected", pad);
                    InputEvent::GamepadDisconnected { id: pad }
                }
                other => {
                    debug!(target: "platform::input", "Ignored gamepad event {:?}", other);
                    continue;
                }
            };

            buffer.push(input);
        }
    }
}

//=========================================================================
// gilrs Conversions
//=========================================================================

/// gilrs names the bumpers `LeftTrigger`/`RightTrigger` and the analog
/// triggers `LeftTrigger2`/`RightTrigger2`.
impl From<Button> for GamepadButton {
    fn from(button: Button) -> Self {
        match button {
            Button::South => GamepadButton::South,
            Button::East => GamepadButton::East,
            Button::North => GamepadButton::North,
            Button::West => GamepadButton::West,
            Button::LeftTrigger => GamepadButton::LeftBumper,
            Button::RightTrigger => GamepadButton::RightBumper,
            Button::LeftTrigger2 => GamepadButton::LeftTrigger,
            Button::RightTrigger2 => GamepadButton::RightTrigger,
            Button::Select => GamepadButton::Select,
            Button::Start => GamepadButton::Start,
            Button::Mode => GamepadButton::Mode,
            Button::LeftThumb => GamepadButton::LeftThumb,
            Button::RightThumb => GamepadButton::RightThumb,
            Button::DPadUp => GamepadButton::DPadUp,
            Button::DPadDown => GamepadButton::DPadDown,
            Button::DPadLeft => GamepadButton::DPadLeft,
            Button::DPadRight => GamepadButton::DPadRight,
            _ => GamepadButton::Unknown,
        }
    }
}

impl From<Axis> for GamepadAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::LeftStickX => GamepadAxis::LeftStickX,
            Axis::LeftStickY => GamepadAxis::LeftStickY,
            Axis::RightStickX => GamepadAxis::RightStickX,
            Axis::RightStickY => GamepadAxis::RightStickY,
            Axis::LeftZ => GamepadAxis::LeftZ,
            Axis::RightZ => GamepadAxis::RightZ,
            Axis::DPadX => GamepadAxis::DPadX,
            Axis::DPadY => GamepadAxis::DPadY,
            _ => GamepadAxis::Unknown,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_map_by_position() {
        assert_eq!(GamepadButton::from(Button::South), GamepadButton::South);
        assert_eq!(GamepadButton::from(Button::West), GamepadButton::West);
        assert_eq!(GamepadButton::from(Button::Start), GamepadButton::Start);
    }

    #[test]
    fn shoulder_buttons_split_bumpers_and_triggers() {
        assert_eq!(GamepadButton::from(Button::LeftTrigger), GamepadButton::LeftBumper);
        assert_eq!(GamepadButton::from(Button::LeftTrigger2), GamepadButton::LeftTrigger);
        assert_eq!(GamepadButton::from(Button::RightTrigger2), GamepadButton::RightTrigger);
    }

    #[test]
    fn exotic_buttons_are_unknown() {
        assert_eq!(GamepadButton::from(Button::C), GamepadButton::Unknown);
        assert_eq!(GamepadButton::from(Button::Unknown), GamepadButton::Unknown);
    }

    #[test]
    fn axis_conversion() {
        assert_eq!(GamepadAxis::from(Axis::LeftStickX), GamepadAxis::LeftStickX);
        assert_eq!(GamepadAxis::from(Axis::RightZ), GamepadAxis::RightZ);
        assert_eq!(GamepadAxis::from(Axis::Unknown), GamepadAxis::Unknown);
    }
}
