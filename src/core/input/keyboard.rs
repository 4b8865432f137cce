//=========================================================================
// Keyboard
//=========================================================================
//
// Timed key records plus the last reported modifier state.
//
//=========================================================================

use log::trace;

use super::event::{InputEvent, KeyCode, Modifiers};
use super::record::TickStamp;
use super::state_tracker::{InputQuery, InputTracker};

//=== Keyboard ============================================================

/// Keyboard state as seen by scenes.
///
/// All key queries come from [`InputQuery`]:
///
/// ```ignore
/// if context.keyboard.just_pressed(KeyCode::Space) {
///     player.jump();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    keys: InputTracker<KeyCode>,
    modifiers: Modifiers,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Tick Processing --------------------------------------------------

    pub(crate) fn begin_tick(&mut self, stamp: TickStamp) {
        self.keys.begin_tick(stamp);
    }

    /// Applies a key event. Returns `false` for non-keyboard events.
    pub(crate) fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                trace!("key down: {key:?}");
                self.modifiers = *modifiers;
                self.keys.activate(*key);
                true
            }
            InputEvent::KeyUp { key, modifiers } => {
                trace!("key up: {key:?}");
                self.modifiers = *modifiers;
                self.keys.deactivate(*key);
                true
            }
            _ => false,
        }
    }

    //--- Modifiers --------------------------------------------------------

    /// Modifier state carried by the last key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    pub fn alt_held(&self) -> bool {
        self.modifiers.alt
    }
}

impl InputQuery<KeyCode> for Keyboard {
    fn tracker(&self) -> &InputTracker<KeyCode> {
        &self.keys
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
