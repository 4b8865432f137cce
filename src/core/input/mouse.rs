//=========================================================================
// Mouse
//=========================================================================
//
// Timed button records plus last-motion and last-wheel snapshots.
//
// Motion and wheel keep no history: each event overwrites the snapshot.
// Snapshots carry the tick they were taken on so scenes can tell a fresh
// reading from a stale one.
//
//=========================================================================

use log::trace;

use super::event::{InputEvent, Modifiers, MouseButton};
use super::record::TickStamp;
use super::state_tracker::{InputQuery, InputTracker};
use crate::core::config::Size;

//=== Snapshots ===========================================================

/// Last cursor motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMotion {
    /// Window-space position (pixels, top-left origin).
    pub position: (f32, f32),

    /// Movement relative to the previous motion snapshot.
    pub delta: (f32, f32),

    pub tick: u64,
}

/// Last wheel scroll, in lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheel {
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

//=== Mouse ===============================================================

/// Mouse state as seen by scenes.
#[derive(Debug, Clone, Default)]
pub struct Mouse {
    buttons: InputTracker<MouseButton>,
    modifiers: Modifiers,
    motion: Option<MouseMotion>,
    wheel: Option<MouseWheel>,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Tick Processing --------------------------------------------------

    pub(crate) fn begin_tick(&mut self, stamp: TickStamp) {
        self.buttons.begin_tick(stamp);
    }

    /// Applies a mouse event. Returns `false` for non-mouse events.
    pub(crate) fn handle_event(&mut self, event: &InputEvent) -> bool {
        let tick = self.buttons.stamp().tick;

        match event {
            InputEvent::MouseButtonDown { button, modifiers } => {
                trace!("mouse down: {button:?}");
                self.modifiers = *modifiers;
                self.buttons.activate(*button);
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                trace!("mouse up: {button:?}");
                self.modifiers = *modifiers;
                self.buttons.deactivate(*button);
            }
            InputEvent::MouseMoved { x, y } => {
                let delta = match self.motion {
                    Some(previous) => (x - previous.position.0, y - previous.position.1),
                    None => (0.0, 0.0),
                };
                self.motion = Some(MouseMotion {
                    position: (*x, *y),
                    delta,
                    tick,
                });
            }
            InputEvent::MouseWheel { x, y } => {
                self.wheel = Some(MouseWheel { x: *x, y: *y, tick });
            }
            _ => return false,
        }
        true
    }

    //--- Motion -----------------------------------------------------------

    pub fn motion(&self) -> Option<MouseMotion> {
        self.motion
    }

    /// Last known cursor position in window space.
    pub fn position(&self) -> Option<(f32, f32)> {
        self.motion.map(|motion| motion.position)
    }

    /// Cursor position mapped from window space (`screen`) onto the render
    /// surface (`display`).
    ///
    /// Returns `None` before the first motion or if `screen` is empty.
    pub fn scaled_position(&self, screen: Size, display: Size) -> Option<(f32, f32)> {
        if screen.is_empty() {
            return None;
        }
        let (x, y) = self.position()?;
        let scale_x = display.width as f32 / screen.width as f32;
        let scale_y = display.height as f32 / screen.height as f32;
        Some((x * scale_x, y * scale_y))
    }

    /// `true` if the cursor moved during the current tick.
    pub fn just_moved(&self) -> bool {
        let tick = self.buttons.stamp().tick;
        self.motion.is_some_and(|motion| motion.tick == tick)
    }

    //--- Wheel ------------------------------------------------------------

    pub fn wheel(&self) -> Option<MouseWheel> {
        self.wheel
    }

    /// `true` if the wheel scrolled during the current tick.
    pub fn just_scrolled(&self) -> bool {
        let tick = self.buttons.stamp().tick;
        self.wheel.is_some_and(|wheel| wheel.tick == tick)
    }

    //--- Modifiers --------------------------------------------------------

    /// Modifier state carried by the last button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl InputQuery<MouseButton> for Mouse {
    fn tracker(&self) -> &InputTracker<MouseButton> {
        &self.buttons
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn mouse_at(tick: u64) -> Mouse {
        let mut mouse = Mouse::new();
        mouse.begin_tick(TickStamp::new(tick, 0.0));
        mouse
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    //=====================================================================
    // Button Tests
    //=====================================================================

    #[test]
    fn buttons_are_tracked() {
        let mut mouse = mouse_at(1);
        mouse.handle_event(&InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
        });

        assert!(mouse.just_pressed(MouseButton::Left));
        assert!(!mouse.is_pressed(MouseButton::Right));
        assert_eq!(mouse.modifiers(), Modifiers::SHIFT);

        mouse.begin_tick(TickStamp::new(2, 0.1));
        mouse.handle_event(&InputEvent::MouseButtonUp {
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
        assert!(mouse.just_released(MouseButton::Left));
    }

    //=====================================================================
    // Motion Tests
    //=====================================================================

    #[test]
    fn position_absent_before_motion() {
        let mouse = mouse_at(1);

        assert_eq!(mouse.position(), None);
        assert_eq!(mouse.scaled_position(Size::new(800, 600), Size::new(400, 300)), None);
        assert!(!mouse.just_moved());
    }

    #[test]
    fn motion_snapshot_tracks_delta() {
        let mut mouse = mouse_at(1);
        mouse.handle_event(&mouse_move(100.0, 100.0));
        assert_eq!(mouse.motion().map(|m| m.delta), Some((0.0, 0.0)));

        mouse.begin_tick(TickStamp::new(2, 0.0));
        mouse.handle_event(&mouse_move(150.0, 120.0));
        assert_eq!(mouse.motion().map(|m| m.delta), Some((50.0, 20.0)));
        assert!(mouse.just_moved());

        mouse.begin_tick(TickStamp::new(3, 0.0));
        assert!(!mouse.just_moved());
        assert_eq!(mouse.position(), Some((150.0, 120.0)));
    }

    #[test]
    fn scaled_position_maps_window_to_surface() {
        let mut mouse = mouse_at(1);
        mouse.handle_event(&mouse_move(400.0, 300.0));

        let scaled = mouse.scaled_position(Size::new(800, 600), Size::new(320, 240));
        assert_eq!(scaled, Some((160.0, 120.0)));
        assert_eq!(mouse.scaled_position(Size::new(0, 0), Size::new(320, 240)), None);
    }

    //=====================================================================
    // Wheel Tests
    //=====================================================================

    #[test]
    fn wheel_snapshot_overwrites() {
        let mut mouse = mouse_at(4);
        mouse.handle_event(&InputEvent::MouseWheel { x: 0.0, y: 1.0 });
        mouse.handle_event(&InputEvent::MouseWheel { x: 0.0, y: -2.0 });

        assert_eq!(mouse.wheel(), Some(MouseWheel { x: 0.0, y: -2.0, tick: 4 }));
        assert!(mouse.just_scrolled());
    }

    #[test]
    fn keyboard_events_are_rejected() {
        let mut mouse = mouse_at(1);
        let event = InputEvent::KeyDown {
            key: crate::core::input::KeyCode::KeyA,
            modifiers: Modifiers::NONE,
        };
        assert!(!mouse.handle_event(&event));
    }
}
