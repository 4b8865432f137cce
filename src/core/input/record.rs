//=========================================================================
// Input Records
//=========================================================================
//
// Timed per-identifier input records.
//
// One record exists per key / button / axis once it has been activated at
// least once. Activation replaces the record, deactivation mutates it.
//
//=========================================================================

//=== TickStamp ===========================================================

/// Tick counter and wall-clock seconds sampled at the start of a tick.
///
/// Every timestamp written and every "now" used by a query during that
/// tick comes from the same stamp, so all trackers agree on what the
/// current tick is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickStamp {
    /// Monotonic tick counter (first tick is 1).
    pub tick: u64,

    /// Seconds since the game loop started.
    pub time: f64,
}

impl TickStamp {
    pub fn new(tick: u64, time: f64) -> Self {
        Self { tick, time }
    }
}

//=== InputRecord =========================================================

/// Activation history of a single input identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord<K> {
    identifier: K,
    is_active: bool,
    activation_time: f64,
    activation_tick: u64,
    deactivation: Option<TickStamp>,
}

impl<K: Copy> InputRecord<K> {
    /// Creates an active record stamped with `stamp`.
    pub(crate) fn activated(identifier: K, stamp: TickStamp) -> Self {
        Self {
            identifier,
            is_active: true,
            activation_time: stamp.time,
            activation_tick: stamp.tick,
            deactivation: None,
        }
    }

    /// Marks the record inactive as of `stamp`.
    pub(crate) fn deactivate(&mut self, stamp: TickStamp) {
        self.is_active = false;
        self.deactivation = Some(stamp);
    }

    //--- Accessors --------------------------------------------------------

    pub fn identifier(&self) -> K {
        self.identifier
    }

    /// `true` while the input is held.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn activation_time(&self) -> f64 {
        self.activation_time
    }

    pub fn activation_tick(&self) -> u64 {
        self.activation_tick
    }

    /// Stamp of the last release, unset while active.
    pub fn deactivation(&self) -> Option<TickStamp> {
        self.deactivation
    }

    pub fn deactivation_time(&self) -> Option<f64> {
        self.deactivation.map(|stamp| stamp.time)
    }

    pub fn deactivation_tick(&self) -> Option<u64> {
        self.deactivation.map(|stamp| stamp.tick)
    }
}

//=== AxisRecord ==========================================================

/// Record of an analog axis: activation means "moving".
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRecord<K> {
    pub(crate) record: InputRecord<K>,
    pub(crate) magnitude: f32,
    pub(crate) sensitivity: f32,
}

impl<K: Copy> AxisRecord<K> {
    /// Underlying activation record.
    pub fn record(&self) -> &InputRecord<K> {
        &self.record
    }

    pub fn identifier(&self) -> K {
        self.record.identifier
    }

    pub fn is_moving(&self) -> bool {
        self.record.is_active
    }

    /// Raw value last reported by the device.
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Magnitude scaled by sensitivity.
    pub fn value(&self) -> f32 {
        self.magnitude * self.sensitivity
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
