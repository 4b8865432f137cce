//=========================================================================
// State Tracker
//=========================================================================
//
// Timed input state tracking with tick-accurate edge detection.
//
// Architecture:
//   InputEvent → activate()/deactivate() → HashMap<K, InputRecord> → query
//
// Tick lifecycle: begin_tick(stamp) → activate/deactivate → query
//
// "Just pressed" and "just released" are not stored flags that must be
// cleared: they are derived by comparing a record's stamps with the
// current tick, so a record stays correct for as long as it lives.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::record::{AxisRecord, InputRecord, TickStamp};

//=== Constants ===========================================================

/// Scaled axis values at or below this magnitude count as "at rest".
pub const AXIS_DEAD_ZONE: f32 = 1e-4;

//=== InputQuery ==========================================================

/// Query API shared by every button-like input device.
///
/// Implementors only expose their [`InputTracker`]; every query is derived
/// from it. Unknown identifiers never error: they answer `false` or `None`.
pub trait InputQuery<K: Copy + Eq + Hash> {
    /// Tracker holding the records for this device.
    fn tracker(&self) -> &InputTracker<K>;

    //--- State ------------------------------------------------------------

    /// Returns `true` while `id` is held.
    fn is_pressed(&self, id: K) -> bool {
        self.tracker()
            .record(id)
            .is_some_and(|record| record.is_active())
    }

    /// Synonym of [`is_pressed`](Self::is_pressed).
    fn is_held(&self, id: K) -> bool {
        self.is_pressed(id)
    }

    /// Returns `true` only on the tick `id` was activated.
    fn just_pressed(&self, id: K) -> bool {
        let now = self.tracker().stamp().tick;
        self.tracker()
            .record(id)
            .is_some_and(|record| record.activation_tick() == now)
    }

    /// Returns `true` only on the tick `id` was deactivated.
    fn just_released(&self, id: K) -> bool {
        let now = self.tracker().stamp().tick;
        self.tracker()
            .record(id)
            .is_some_and(|record| record.deactivation_tick() == Some(now))
    }

    //--- Stamps -----------------------------------------------------------

    /// Seconds (since loop start) at which `id` was last activated.
    fn press_time(&self, id: K) -> Option<f64> {
        self.tracker().record(id).map(|record| record.activation_time())
    }

    fn press_tick(&self, id: K) -> Option<u64> {
        self.tracker().record(id).map(|record| record.activation_tick())
    }

    /// Seconds at which `id` was last released, if it has been.
    fn release_time(&self, id: K) -> Option<f64> {
        self.tracker()
            .record(id)
            .and_then(|record| record.deactivation_time())
    }

    fn release_tick(&self, id: K) -> Option<u64> {
        self.tracker()
            .record(id)
            .and_then(|record| record.deactivation_tick())
    }

    //--- Durations --------------------------------------------------------

    /// Seconds `id` has been held. `None` unless currently held.
    fn hold_time(&self, id: K) -> Option<f64> {
        let now = self.tracker().stamp().time;
        self.tracker()
            .record(id)
            .filter(|record| record.is_active())
            .map(|record| now - record.activation_time())
    }

    /// Ticks `id` has been held. `None` unless currently held.
    fn hold_ticks(&self, id: K) -> Option<u64> {
        let now = self.tracker().stamp().tick;
        self.tracker()
            .record(id)
            .filter(|record| record.is_active())
            .map(|record| now.saturating_sub(record.activation_tick()))
    }

    /// Seconds since `id` was released. `None` while held or never seen.
    fn time_since_release(&self, id: K) -> Option<f64> {
        let now = self.tracker().stamp().time;
        self.tracker()
            .record(id)
            .filter(|record| !record.is_active())
            .and_then(|record| record.deactivation_time())
            .map(|time| now - time)
    }

    /// Ticks since `id` was released. `None` while held or never seen.
    fn ticks_since_release(&self, id: K) -> Option<u64> {
        let now = self.tracker().stamp().tick;
        self.tracker()
            .record(id)
            .filter(|record| !record.is_active())
            .and_then(|record| record.deactivation_tick())
            .map(|tick| now.saturating_sub(tick))
    }

    //--- Iteration --------------------------------------------------------

    /// All currently held records, in no particular order.
    fn get_active(&self) -> Vec<&InputRecord<K>> {
        self.tracker()
            .records()
            .filter(|record| record.is_active())
            .collect()
    }
}

//=== InputTracker ========================================================

/// Per-identifier timed records for a button-like device.
#[derive(Debug, Clone)]
pub struct InputTracker<K> {
    records: HashMap<K, InputRecord<K>>,
    stamp: TickStamp,
}

impl<K: Copy + Eq + Hash> InputTracker<K> {
    /// Creates an empty tracker at tick 0.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            stamp: TickStamp::default(),
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Sets the stamp used by subsequent events and queries.
    pub fn begin_tick(&mut self, stamp: TickStamp) {
        self.stamp = stamp;
    }

    /// Records a press, replacing any previous record for `id`.
    pub fn activate(&mut self, id: K) {
        self.records.insert(id, InputRecord::activated(id, self.stamp));
    }

    /// Records a release. Returns `false` if `id` was never pressed.
    pub fn deactivate(&mut self, id: K) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => {
                record.deactivate(self.stamp);
                true
            }
            None => false,
        }
    }

    /// Forgets every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    //--- Accessors --------------------------------------------------------

    pub fn stamp(&self) -> TickStamp {
        self.stamp
    }

    pub fn record(&self, id: K) -> Option<&InputRecord<K>> {
        self.records.get(&id)
    }

    /// Every record, active or not.
    pub fn records(&self) -> impl Iterator<Item = &InputRecord<K>> {
        self.records.values()
    }
}

impl<K: Copy + Eq + Hash> InputQuery<K> for InputTracker<K> {
    fn tracker(&self) -> &InputTracker<K> {
        self
    }
}

//--- Trait Implementations -----------------------------------------------

impl<K: Copy + Eq + Hash> Default for InputTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== AxisTracker =========================================================

/// Timed records for analog axes, with per-axis sensitivity.
///
/// An axis is "moving" while its scaled value exceeds [`AXIS_DEAD_ZONE`].
/// Crossing from rest to moving is an activation, crossing back is a
/// deactivation; anything else only updates the magnitude.
#[derive(Debug, Clone)]
pub struct AxisTracker<K> {
    records: HashMap<K, AxisRecord<K>>,
    sensitivities: HashMap<K, f32>,
    stamp: TickStamp,
}

impl<K: Copy + Eq + Hash> AxisTracker<K> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            sensitivities: HashMap::new(),
            stamp: TickStamp::default(),
        }
    }

    //--- Tick Processing --------------------------------------------------

    pub fn begin_tick(&mut self, stamp: TickStamp) {
        self.stamp = stamp;
    }

    /// Applies a raw axis reading.
    pub fn handle_motion(&mut self, id: K, raw: f32) {
        let sensitivity = self.sensitivity(id);
        let moving = (raw * sensitivity).abs() > AXIS_DEAD_ZONE;
        let stamp = self.stamp;

        match self.records.get_mut(&id) {
            Some(axis) if moving && !axis.is_moving() => {
                axis.record = InputRecord::activated(id, stamp);
                axis.magnitude = raw;
            }
            Some(axis) if !moving && axis.is_moving() => {
                axis.record.deactivate(stamp);
                axis.magnitude = raw;
            }
            Some(axis) => {
                axis.magnitude = raw;
            }
            None if moving => {
                self.records.insert(
                    id,
                    AxisRecord {
                        record: InputRecord::activated(id, stamp),
                        magnitude: raw,
                        sensitivity,
                    },
                );
            }
            // Resting axis never seen before: nothing to record
            None => {}
        }
    }

    /// Sets the sensitivity of `id`, clamped to [0, 1].
    ///
    /// May be called before the axis has reported any motion.
    pub fn set_sensitivity(&mut self, id: K, sensitivity: f32) {
        let sensitivity = sensitivity.clamp(0.0, 1.0);
        self.sensitivities.insert(id, sensitivity);
        if let Some(axis) = self.records.get_mut(&id) {
            axis.sensitivity = sensitivity;
        }
    }

    /// Forgets every record but keeps configured sensitivities.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn stamp(&self) -> TickStamp {
        self.stamp
    }

    /// Sensitivity of `id` (1.0 unless configured).
    pub fn sensitivity(&self, id: K) -> f32 {
        self.sensitivities.get(&id).copied().unwrap_or(1.0)
    }

    pub fn axis(&self, id: K) -> Option<&AxisRecord<K>> {
        self.records.get(&id)
    }

    pub fn is_moving(&self, id: K) -> bool {
        self.axis(id).is_some_and(|axis| axis.is_moving())
    }

    /// Returns `true` only on the tick `id` left the dead zone.
    pub fn just_moved(&self, id: K) -> bool {
        self.axis(id)
            .is_some_and(|axis| axis.record.activation_tick() == self.stamp.tick)
    }

    /// Returns `true` only on the tick `id` came to rest.
    pub fn just_stopped(&self, id: K) -> bool {
        self.axis(id)
            .is_some_and(|axis| axis.record.deactivation_tick() == Some(self.stamp.tick))
    }

    /// Scaled value of `id`, if it was ever seen moving.
    pub fn value(&self, id: K) -> Option<f32> {
        self.axis(id).map(|axis| axis.value())
    }

    /// Seconds `id` has been moving. `None` unless moving.
    pub fn hold_time(&self, id: K) -> Option<f64> {
        self.axis(id)
            .filter(|axis| axis.is_moving())
            .map(|axis| self.stamp.time - axis.record.activation_time())
    }

    pub fn hold_ticks(&self, id: K) -> Option<u64> {
        self.axis(id)
            .filter(|axis| axis.is_moving())
            .map(|axis| self.stamp.tick.saturating_sub(axis.record.activation_tick()))
    }

    /// Seconds since `id` came to rest. `None` while moving or never seen.
    pub fn time_since_rest(&self, id: K) -> Option<f64> {
        self.axis(id)
            .filter(|axis| !axis.is_moving())
            .and_then(|axis| axis.record.deactivation_time())
            .map(|time| self.stamp.time - time)
    }

    pub fn ticks_since_rest(&self, id: K) -> Option<u64> {
        self.axis(id)
            .filter(|axis| !axis.is_moving())
            .and_then(|axis| axis.record.deactivation_tick())
            .map(|tick| self.stamp.tick.saturating_sub(tick))
    }

    /// All axes currently outside the dead zone.
    pub fn get_moving(&self) -> Vec<&AxisRecord<K>> {
        self.records.values().filter(|axis| axis.is_moving()).collect()
    }
}

impl<K: Copy + Eq + Hash> Default for AxisTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::KeyCode;

    //--- Test Helpers -----------------------------------------------------

    fn stamp(tick: u64) -> TickStamp {
        TickStamp::new(tick, tick as f64 * 0.5)
    }

    fn tracker_at(tick: u64) -> InputTracker<KeyCode> {
        let mut tracker = InputTracker::new();
        tracker.begin_tick(stamp(tick));
        tracker
    }

    //=====================================================================
    // Absent Records
    //=====================================================================

    /// Tests that nothing is reported before an identifier is seen.
    #[test]
    fn queries_absent_before_first_activation() {
        let tracker = tracker_at(5);

        assert!(!tracker.is_pressed(KeyCode::KeyA));
        assert!(!tracker.just_pressed(KeyCode::KeyA));
        assert!(!tracker.just_released(KeyCode::KeyA));
        assert_eq!(tracker.press_time(KeyCode::KeyA), None);
        assert_eq!(tracker.hold_ticks(KeyCode::KeyA), None);
        assert_eq!(tracker.release_tick(KeyCode::KeyA), None);
        assert_eq!(tracker.ticks_since_release(KeyCode::KeyA), None);
        assert!(tracker.get_active().is_empty());
    }

    /// Tests that releasing an unknown key is ignored.
    #[test]
    fn deactivate_unknown_is_ignored() {
        let mut tracker = tracker_at(1);

        assert!(!tracker.deactivate(KeyCode::KeyZ));
        assert!(tracker.record(KeyCode::KeyZ).is_none());
    }

    //=====================================================================
    // Edge Detection
    //=====================================================================

    /// Tests that just_pressed holds only on the activation tick.
    #[test]
    fn just_pressed_only_on_activation_tick() {
        let mut tracker = tracker_at(5);
        tracker.activate(KeyCode::KeyA);

        assert!(tracker.just_pressed(KeyCode::KeyA));
        assert!(tracker.is_held(KeyCode::KeyA));

        tracker.begin_tick(stamp(6));
        assert!(!tracker.just_pressed(KeyCode::KeyA));
        assert!(tracker.is_held(KeyCode::KeyA));
    }

    /// Tests press and release within one tick.
    #[test]
    fn fast_tap_both_edges_captured() {
        let mut tracker = tracker_at(3);
        tracker.activate(KeyCode::Space);
        tracker.deactivate(KeyCode::Space);

        assert!(tracker.just_pressed(KeyCode::Space));
        assert!(tracker.just_released(KeyCode::Space));
        assert!(!tracker.is_pressed(KeyCode::Space));
    }

    /// Tests that reactivation replaces the record and drops the release.
    #[test]
    fn reactivation_replaces_record() {
        let mut tracker = tracker_at(1);
        tracker.activate(KeyCode::KeyW);
        tracker.begin_tick(stamp(2));
        tracker.deactivate(KeyCode::KeyW);
        tracker.begin_tick(stamp(4));
        tracker.activate(KeyCode::KeyW);

        let record = tracker.record(KeyCode::KeyW).expect("record");
        assert_eq!(record.activation_tick(), 4);
        assert_eq!(record.deactivation(), None);
        assert_eq!(tracker.release_tick(KeyCode::KeyW), None);
    }

    //=====================================================================
    // Durations
    //=====================================================================

    /// Tests hold and release durations.
    #[test]
    fn hold_and_release_durations() {
        let mut tracker = tracker_at(10);
        tracker.activate(KeyCode::KeyD);

        tracker.begin_tick(stamp(14));
        assert_eq!(tracker.hold_ticks(KeyCode::KeyD), Some(4));
        assert_eq!(tracker.hold_time(KeyCode::KeyD), Some(2.0));
        assert_eq!(tracker.ticks_since_release(KeyCode::KeyD), None);

        tracker.deactivate(KeyCode::KeyD);
        tracker.begin_tick(stamp(20));
        assert_eq!(tracker.hold_ticks(KeyCode::KeyD), None);
        assert_eq!(tracker.ticks_since_release(KeyCode::KeyD), Some(6));
        assert_eq!(tracker.time_since_release(KeyCode::KeyD), Some(3.0));
        assert_eq!(tracker.press_tick(KeyCode::KeyD), Some(10));
        assert_eq!(tracker.release_tick(KeyCode::KeyD), Some(14));
    }

    /// Tests that the activation tick itself counts as zero held ticks.
    #[test]
    fn zero_ticks_is_a_real_value() {
        let mut tracker = tracker_at(8);
        tracker.activate(KeyCode::Enter);

        assert_eq!(tracker.hold_ticks(KeyCode::Enter), Some(0));
    }

    //=====================================================================
    // Iteration
    //=====================================================================

    /// Tests get_active only lists held keys.
    #[test]
    fn get_active_lists_held_records() {
        let mut tracker = tracker_at(1);
        tracker.activate(KeyCode::KeyA);
        tracker.activate(KeyCode::KeyB);
        tracker.activate(KeyCode::KeyC);
        tracker.deactivate(KeyCode::KeyB);

        let mut active: Vec<_> = tracker
            .get_active()
            .into_iter()
            .map(|record| record.identifier())
            .collect();
        active.sort_by_key(|key| format!("{key:?}"));

        assert_eq!(active, vec![KeyCode::KeyA, KeyCode::KeyC]);
    }

    //=====================================================================
    // Axis Tracking
    //=====================================================================

    /// Tests that a resting axis never seen creates no record.
    #[test]
    fn axis_rest_before_seen_is_ignored() {
        let mut axes: AxisTracker<u8> = AxisTracker::new();
        axes.begin_tick(stamp(1));
        axes.handle_motion(0, 0.00001);

        assert!(axes.axis(0).is_none());
        assert_eq!(axes.value(0), None);
    }

    /// Tests rest → moving → rest edges.
    #[test]
    fn axis_edges_are_timestamped() {
        let mut axes: AxisTracker<u8> = AxisTracker::new();

        axes.begin_tick(stamp(2));
        axes.handle_motion(0, 0.5);
        assert!(axes.just_moved(0));
        assert!(axes.is_moving(0));

        axes.begin_tick(stamp(3));
        axes.handle_motion(0, 0.7);
        assert!(!axes.just_moved(0));
        assert_eq!(axes.value(0), Some(0.7));
        assert_eq!(axes.hold_ticks(0), Some(1));

        axes.begin_tick(stamp(5));
        axes.handle_motion(0, 0.0);
        assert!(axes.just_stopped(0));
        assert!(!axes.is_moving(0));
        assert_eq!(axes.hold_ticks(0), None);

        axes.begin_tick(stamp(9));
        assert_eq!(axes.ticks_since_rest(0), Some(4));
        assert_eq!(axes.time_since_rest(0), Some(2.0));
    }

    /// Tests sensitivity scaling and clamping.
    #[test]
    fn axis_sensitivity_scales_and_clamps() {
        let mut axes: AxisTracker<u8> = AxisTracker::new();
        axes.set_sensitivity(1, 3.0);
        assert_eq!(axes.sensitivity(1), 1.0);

        axes.set_sensitivity(1, 0.0);
        axes.begin_tick(stamp(1));
        axes.handle_motion(1, 1.0);
        assert!(axes.axis(1).is_none(), "zero sensitivity keeps axis at rest");

        axes.set_sensitivity(1, 0.5);
        axes.handle_motion(1, 0.8);
        assert_eq!(axes.value(1), Some(0.4));
        assert_eq!(axes.get_moving().len(), 1);
    }

    /// Tests that reactivation keeps the configured sensitivity.
    #[test]
    fn axis_reactivation_keeps_sensitivity() {
        let mut axes: AxisTracker<u8> = AxisTracker::new();
        axes.begin_tick(stamp(1));
        axes.handle_motion(2, 1.0);
        axes.set_sensitivity(2, 0.25);
        axes.handle_motion(2, 0.0);

        axes.begin_tick(stamp(2));
        axes.handle_motion(2, 1.0);

        assert!(axes.just_moved(2));
        assert_eq!(axes.axis(2).map(|axis| axis.sensitivity()), Some(0.25));
    }
}
