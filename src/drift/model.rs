use super::{StickAxis, STICK_AXES};

/// Rest-position offset measured for each stick axis. Values are kept in the
/// range -1.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBias([f64; STICK_AXES]);

impl AxisBias {
    pub fn new(values: [f64; STICK_AXES]) -> Self {
        Self(values.map(|v| v.clamp(-1.0, 1.0)))
    }

    pub fn get(&self, axis: StickAxis) -> f64 {
        self.0[axis.index()]
    }

    pub fn as_array(&self) -> [f64; STICK_AXES] {
        self.0
    }
}

/// Deadzone threshold for each stick axis. Thresholds are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadzoneSet([f64; STICK_AXES]);

impl DeadzoneSet {
    /// Create a deadzone set with the same threshold on every axis
    pub fn uniform(base: f64) -> Self {
        Self([base.max(0.0); STICK_AXES])
    }

    pub fn get(&self, axis: StickAxis) -> f64 {
        self.0[axis.index()]
    }
}

/// The [BiasModel] holds the per-axis bias estimates and deadzone thresholds
/// used to correct raw stick values. It is built once at startup and is
/// read-only for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasModel {
    bias: AxisBias,
    deadzones: DeadzoneSet,
}

impl BiasModel {
    /// Create a new [BiasModel] from a bias vector and a base deadzone that is
    /// applied uniformly to all axes.
    pub fn new(bias: [f64; STICK_AXES], base_deadzone: f64) -> Self {
        Self {
            bias: AxisBias::new(bias),
            deadzones: DeadzoneSet::uniform(base_deadzone),
        }
    }

    /// Returns the measured bias of the given axis
    pub fn bias(&self, axis: StickAxis) -> f64 {
        self.bias.get(axis)
    }

    /// Returns the deadzone threshold of the given axis
    pub fn deadzone(&self, axis: StickAxis) -> f64 {
        self.deadzones.get(axis)
    }

    /// Returns the bias of every axis in raw axis order
    pub fn bias_values(&self) -> [f64; STICK_AXES] {
        self.bias.as_array()
    }
}
