use super::{history::AxisHistory, StickAxis, STICK_AXES};

/// Default number of samples kept per axis
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
/// Default mean sample-to-sample change above which an axis is considered to
/// be moved by the user
pub const DEFAULT_MOTION_THRESHOLD: f64 = 0.1;
/// Fewer samples than this are not enough evidence of motion
pub const MIN_MOTION_SAMPLES: usize = 3;

/// The [MotionDetector] tracks a short history of raw samples per axis and
/// classifies whether the axis is being actively moved or is only reading
/// static noise.
#[derive(Debug, Clone)]
pub struct MotionDetector {
    histories: [AxisHistory; STICK_AXES],
    threshold: f64,
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY, DEFAULT_MOTION_THRESHOLD)
    }
}

impl MotionDetector {
    pub fn new(capacity: usize, threshold: f64) -> Self {
        Self {
            histories: std::array::from_fn(|_| AxisHistory::new(capacity)),
            threshold,
        }
    }

    /// Record the given raw value for the axis and return true if the recent
    /// samples indicate intentional movement.
    pub fn observe(&mut self, axis: StickAxis, raw_value: f64) -> bool {
        let history = &mut self.histories[axis.index()];
        history.push(raw_value);

        if history.len() < MIN_MOTION_SAMPLES {
            return false;
        }

        let moving = history
            .mean_abs_delta()
            .is_some_and(|change| change > self.threshold);
        log::trace!("Axis {axis:?} motion check: moving={moving}");
        moving
    }

    /// Returns the recorded history of the given axis
    pub fn history(&self, axis: StickAxis) -> &AxisHistory {
        &self.histories[axis.index()]
    }
}
