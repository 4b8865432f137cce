//=========================================================================
// Joysticks
//=========================================================================
//
// Per-device button and axis trackers, routed by the `JoystickHub`.
//
// Device lifecycle:
// ```text
//   GamepadConnected ──► Joystick (connected) ──► GamepadDisconnected
//          ▲                                            │
//          └──────────── reconnect reuses slot ◄────────┘
// ```
//
// Disconnecting clears every record of the device, so a pad unplugged
// with a button held never reports that button as stuck.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::event::{GamepadAxis, GamepadButton, InputEvent, JoystickId};
use super::record::TickStamp;
use super::state_tracker::{AxisTracker, InputQuery, InputTracker};

//=== Joystick ============================================================

/// A single gamepad.
///
/// Button queries come from [`InputQuery`], axis queries from
/// [`axes`](Self::axes).
#[derive(Debug, Clone)]
pub struct Joystick {
    id: JoystickId,
    name: String,
    connected: bool,
    buttons: InputTracker<GamepadButton>,
    axes: AxisTracker<GamepadAxis>,
}

impl Joystick {
    fn new(id: JoystickId, name: String, stamp: TickStamp) -> Self {
        let mut buttons = InputTracker::new();
        let mut axes = AxisTracker::new();
        buttons.begin_tick(stamp);
        axes.begin_tick(stamp);

        Self {
            id,
            name,
            connected: true,
            buttons,
            axes,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> JoystickId {
        self.id
    }

    /// Device name reported by the backend.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn axes(&self) -> &AxisTracker<GamepadAxis> {
        &self.axes
    }

    /// Sets the sensitivity of `axis`, clamped to [0, 1].
    pub fn set_axis_sensitivity(&mut self, axis: GamepadAxis, sensitivity: f32) {
        self.axes.set_sensitivity(axis, sensitivity);
    }

    //--- Lifecycle --------------------------------------------------------

    fn begin_tick(&mut self, stamp: TickStamp) {
        self.buttons.begin_tick(stamp);
        self.axes.begin_tick(stamp);
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.buttons.clear();
        self.axes.clear();
    }
}

impl InputQuery<GamepadButton> for Joystick {
    fn tracker(&self) -> &InputTracker<GamepadButton> {
        &self.buttons
    }
}

//=== JoystickHub =========================================================

/// Registry of every joystick seen since startup.
#[derive(Debug, Clone, Default)]
pub struct JoystickHub {
    joysticks: HashMap<JoystickId, Joystick>,
    stamp: TickStamp,
}

impl JoystickHub {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Tick Processing --------------------------------------------------

    pub(crate) fn begin_tick(&mut self, stamp: TickStamp) {
        self.stamp = stamp;
        for joystick in self.joysticks.values_mut() {
            joystick.begin_tick(stamp);
        }
    }

    /// Routes a gamepad event. Returns `false` for non-gamepad events.
    pub(crate) fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::GamepadConnected { id, name } => {
                self.connect(*id, name);
            }
            InputEvent::GamepadDisconnected { id } => {
                if let Some(joystick) = self.joysticks.get_mut(id) {
                    info!("Joystick {id} disconnected ({})", joystick.name);
                    joystick.disconnect();
                }
            }
            InputEvent::GamepadButtonDown { id, button } => {
                if let Some(joystick) = self.connected_mut(*id) {
                    trace!("joystick {id} button down: {button:?}");
                    joystick.buttons.activate(*button);
                }
            }
            InputEvent::GamepadButtonUp { id, button } => {
                if let Some(joystick) = self.connected_mut(*id) {
                    trace!("joystick {id} button up: {button:?}");
                    joystick.buttons.deactivate(*button);
                }
            }
            InputEvent::GamepadAxisMoved { id, axis, value } => {
                if let Some(joystick) = self.connected_mut(*id) {
                    joystick.axes.handle_motion(*axis, *value);
                }
            }
            _ => return false,
        }
        true
    }

    fn connect(&mut self, id: JoystickId, name: &str) {
        match self.joysticks.get_mut(&id) {
            Some(joystick) => {
                info!("Joystick {id} reconnected ({name})");
                joystick.connected = true;
                joystick.name = name.to_owned();
            }
            None => {
                info!("Joystick {id} connected ({name})");
                self.joysticks
                    .insert(id, Joystick::new(id, name.to_owned(), self.stamp));
            }
        }
    }

    fn connected_mut(&mut self, id: JoystickId) -> Option<&mut Joystick> {
        let joystick = self.joysticks.get_mut(&id).filter(|j| j.connected);
        if joystick.is_none() {
            debug!("Dropping event for unknown or disconnected joystick {id}");
        }
        joystick
    }

    //--- Queries ----------------------------------------------------------

    /// Joystick by id, connected or not.
    pub fn get(&self, id: JoystickId) -> Option<&Joystick> {
        self.joysticks.get(&id)
    }

    pub fn get_mut(&mut self, id: JoystickId) -> Option<&mut Joystick> {
        self.joysticks.get_mut(&id)
    }

    /// Currently connected joysticks, in no particular order.
    pub fn connected(&self) -> impl Iterator<Item = &Joystick> {
        self.joysticks.values().filter(|joystick| joystick.connected)
    }

    pub fn connected_count(&self) -> usize {
        self.connected().count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
