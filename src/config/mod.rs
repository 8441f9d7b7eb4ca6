pub mod path;


use std::{io, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drift::{
    corrector::{DEFAULT_BYPASS_HIGH, DEFAULT_BYPASS_LOW},
    motion::{DEFAULT_HISTORY_CAPACITY, DEFAULT_MOTION_THRESHOLD},
    STICK_AXES,
};

/// Rest-position bias measured on the reference controller
pub const KNOWN_DRIFT: [f64; STICK_AXES] = [0.00002, 0.51562, 0.00002, -0.00002];
/// Deadzone applied to every stick axis after bias removal
pub const DEFAULT_BASE_DEADZONE: f64 = 0.05;
/// Target polling rate in Hz
pub const DEFAULT_POLL_RATE: u32 = 120;
/// Magnitude of the virtual device stick range
pub const DEFAULT_MAX_AXIS_VALUE: i16 = i16::MAX;
/// Name of the virtual device that is created
pub const DEFAULT_TARGET_NAME: &str = "Drift Corrected Xbox 360 Controller";

/// Represents all possible errors loading a [DriftConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Runtime configuration for drift correction. Every field is optional in
/// YAML and defaults to the values measured for the reference controller.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case", default)]
pub struct DriftConfig {
    /// Rest-position bias per stick axis (left X, left Y, right X, right Y)
    pub bias: [f64; STICK_AXES],
    /// Deadzone applied uniformly to all stick axes
    pub base_deadzone: f64,
    /// Mean sample-to-sample change that counts as intentional movement
    pub motion_threshold: f64,
    /// Number of samples kept per axis for motion detection
    pub history_capacity: usize,
    /// Raw value above which the major drift axis skips correction
    pub bypass_high: f64,
    /// Raw value below which the major drift axis skips correction
    pub bypass_low: f64,
    /// Polling rate in Hz
    pub poll_rate: u32,
    /// Magnitude of the virtual stick range
    pub max_axis_value: i16,
    /// Consecutive read failures tolerated before the run is aborted
    pub max_read_retries: u32,
    /// Path to the physical device (e.g. "/dev/input/event12"). The first
    /// detected gamepad is used if unset.
    pub device: Option<String>,
    /// Name of the virtual device
    pub target_name: String,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            bias: KNOWN_DRIFT,
            base_deadzone: DEFAULT_BASE_DEADZONE,
            motion_threshold: DEFAULT_MOTION_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            bypass_high: DEFAULT_BYPASS_HIGH,
            bypass_low: DEFAULT_BYPASS_LOW,
            poll_rate: DEFAULT_POLL_RATE,
            max_axis_value: DEFAULT_MAX_AXIS_VALUE,
            max_read_retries: 0,
            device: None,
            target_name: DEFAULT_TARGET_NAME.to_string(),
        }
    }
}

impl DriftConfig {
    /// Load a [DriftConfig] from the given YAML string
    pub fn from_yaml(content: &str) -> Result<DriftConfig, LoadError> {
        let config: DriftConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a [DriftConfig] from the given YAML file
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<DriftConfig, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: DriftConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration into YAML
    pub fn to_yaml(&self) -> Result<String, LoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that all values are within their valid ranges
    pub fn validate(&self) -> Result<(), LoadError> {
        if let Some(value) = self.bias.iter().find(|v| !(-1.0..=1.0).contains(*v)) {
            return Err(LoadError::InvalidValue {
                field: "bias",
                reason: format!("{value} is outside of -1.0 to 1.0"),
            });
        }
        if self.base_deadzone.is_nan() || self.base_deadzone < 0.0 {
            return Err(LoadError::InvalidValue {
                field: "base_deadzone",
                reason: format!("{} must not be negative", self.base_deadzone),
            });
        }
        if self.motion_threshold.is_nan() || self.motion_threshold < 0.0 {
            return Err(LoadError::InvalidValue {
                field: "motion_threshold",
                reason: format!("{} must not be negative", self.motion_threshold),
            });
        }
        if self.history_capacity == 0 {
            return Err(LoadError::InvalidValue {
                field: "history_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.poll_rate == 0 {
            return Err(LoadError::InvalidValue {
                field: "poll_rate",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_axis_value <= 0 {
            return Err(LoadError::InvalidValue {
                field: "max_axis_value",
                reason: format!("{} must be positive", self.max_axis_value),
            });
        }

        Ok(())
    }

    /// Index of the axis with the largest measured bias, if any axis drifts
    /// by more than the given amount.
    pub fn major_drift_axis(&self, minimum: f64) -> Option<usize> {
        self.bias
            .iter()
            .enumerate()
            .filter(|(_, v)| v.abs() > minimum)
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
            .map(|(i, _)| i)
    }
}
