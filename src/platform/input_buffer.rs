//=========================================================================
// Input Buffer
//
// Collects decoded input events between two redraws, split into two
// categories: discrete and continuous. Acts as a transient event
// aggregator between the winit/gilrs handlers and the game loop.
//
// Responsibilities:
// - Keep discrete events (keys, buttons, connections) in arrival order
// - Deduplicate consecutive identical discrete events
// - Coalesce pointer events (cursor, wheel) per channel
// - Keep every stick axis sample in order, so a stick that leaves and
//   re-enters the dead zone within one frame still reports both edges
// - Hand both lists over atomically via `drain()`
//
// Notes:
// The buffer only lives for one frame and is emptied at every
// `RedrawRequested`, keeping its allocations for the next frame.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Internally maintains:
// - `discrete`: one-shot inputs in order (e.g., KeyDown, GamepadConnected)
// - `continuous`: last-known value per pointer channel
// - `axes`: gamepad axis samples in arrival order
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
    axes: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 16;
        const AXES_BASE: usize = 32;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
            axes: Vec::with_capacity(AXES_BASE),
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Routes an event to the matching category.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest pointer event replaces any previous one on the same
    // channel (see `InputEvent`'s equality). Axis samples are appended.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        if matches!(event, InputEvent::GamepadAxisMoved { .. }) {
            self.axes.push(event);
        } else {
            self.continuous.replace(event);
        }
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Returns `(discrete, continuous)` and empties the buffer, or `None`
    /// if nothing was buffered.
    ///
    /// The continuous list holds the pointer events first, then the axis
    /// samples in arrival order.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = self.discrete.drain(..).collect();
        let mut continuous: Vec<InputEvent> = self.continuous.drain().collect();
        continuous.append(&mut self.axes);
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty() && self.axes.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
