use crate::config::DriftConfig;

use super::{model::BiasModel, motion::MotionDetector, StickAxis};

/// The axis with a large measured bias that gets bypass handling
pub const BYPASS_AXIS: StickAxis = StickAxis::LeftY;
/// Default raw value above which the bypass axis is passed through unmodified
pub const DEFAULT_BYPASS_HIGH: f64 = 0.55;
/// Default raw value below which the bypass axis is passed through unmodified
pub const DEFAULT_BYPASS_LOW: f64 = -0.1;

/// Raw value bounds outside of which the bypass axis skips bias correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BypassBand {
    pub high: f64,
    pub low: f64,
}

impl Default for BypassBand {
    fn default() -> Self {
        Self {
            high: DEFAULT_BYPASS_HIGH,
            low: DEFAULT_BYPASS_LOW,
        }
    }
}

impl BypassBand {
    /// Returns true if the raw value should be used as-is. The positive case
    /// requires the value to be beyond both the fixed bound and the bias.
    pub fn bypasses(&self, raw_value: f64, bias: f64) -> bool {
        (raw_value > self.high && raw_value > bias) || raw_value < self.low
    }
}

/// Converts raw stick samples into corrected, clamped values.
#[derive(Debug, Clone)]
pub struct AxisCorrector {
    model: BiasModel,
    motion: MotionDetector,
    bypass: BypassBand,
}

impl AxisCorrector {
    pub fn new(model: BiasModel, motion: MotionDetector, bypass: BypassBand) -> Self {
        Self {
            model,
            motion,
            bypass,
        }
    }

    /// Create a new [AxisCorrector] from the given configuration
    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(
            BiasModel::new(config.bias, config.base_deadzone),
            MotionDetector::new(config.history_capacity, config.motion_threshold),
            BypassBand {
                high: config.bypass_high,
                low: config.bypass_low,
            },
        )
    }

    /// Returns the bias model used by this corrector
    pub fn model(&self) -> &BiasModel {
        &self.model
    }

    /// Returns the motion detector used by this corrector
    pub fn motion(&self) -> &MotionDetector {
        &self.motion
    }

    /// Correct the given raw value for the given axis. The result is always
    /// in the range -1.0 to 1.0.
    pub fn correct(&mut self, axis: StickAxis, raw_value: f64) -> f64 {
        if !raw_value.is_finite() {
            return 0.0;
        }

        let corrected = if axis == BYPASS_AXIS {
            self.correct_bypass_axis(axis, raw_value)
        } else {
            let corrected = raw_value - self.model.bias(axis);
            if corrected.abs() < self.model.deadzone(axis) {
                0.0
            } else {
                corrected
            }
        };

        corrected.clamp(-1.0, 1.0)
    }

    /// The bypass axis carries a bias comparable to the usable input range, so
    /// travel outside of the bypass band is forwarded unmodified and the
    /// deadzone yields to intentional motion.
    fn correct_bypass_axis(&mut self, axis: StickAxis, raw_value: f64) -> f64 {
        let bias = self.model.bias(axis);
        if self.bypass.bypasses(raw_value, bias) {
            log::trace!("Bypassing correction for {axis:?}: {raw_value}");
            return raw_value;
        }

        let corrected = raw_value - bias;
        // The detector is only consulted when the deadzone would apply
        if corrected.abs() < self.model.deadzone(axis) && !self.motion.observe(axis, raw_value) {
            return 0.0;
        }

        corrected
    }
}
