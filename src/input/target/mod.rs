pub mod debug;
pub mod xb360;
#[cfg(test)]
pub mod xb360_test;

use std::{collections::BTreeSet, fmt::Display};

use clap::ValueEnum;
use thiserror::Error;

use crate::config::DriftConfig;

use super::capability::GamepadButton;

/// Possible errors writing to a target device
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutputError {
    #[error("failed to write to device: {0}")]
    DeviceError(String),
    #[error("device is closed")]
    Closed,
}

impl From<std::io::Error> for OutputError {
    fn from(err: std::io::Error) -> Self {
        OutputError::DeviceError(err.to_string())
    }
}

/// An [OutputSink] is a virtual gamepad. State changes are buffered until
/// [OutputSink::commit] applies them all at once.
pub trait OutputSink {
    /// Set the left stick position. Positive Y is up.
    fn left_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError>;
    /// Set the right stick position. Positive Y is up.
    fn right_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError>;
    fn left_trigger(&mut self, value: u8) -> Result<(), OutputError>;
    fn right_trigger(&mut self, value: u8) -> Result<(), OutputError>;
    fn press(&mut self, button: GamepadButton) -> Result<(), OutputError>;
    fn release(&mut self, button: GamepadButton) -> Result<(), OutputError>;
    /// Apply all pending state
    fn commit(&mut self) -> Result<(), OutputError>;
    /// Release all buttons and center all axes. Does nothing once closed.
    fn reset(&mut self) -> Result<(), OutputError>;
    /// Destroy the device. Safe to call more than once.
    fn close(&mut self) -> Result<(), OutputError>;
}

/// Full state of a virtual gamepad
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub left_stick: (i16, i16),
    pub right_stick: (i16, i16),
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub pressed: BTreeSet<GamepadButton>,
}

impl GamepadState {
    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self.pressed.contains(&button)
    }

    pub fn set_button(&mut self, button: GamepadButton, pressed: bool) {
        if pressed {
            self.pressed.insert(button);
        } else {
            self.pressed.remove(&button);
        }
    }
}

/// Kinds of target devices that can be created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TargetDeviceTypeId {
    /// Virtual Xbox 360 gamepad using uinput
    #[default]
    Xb360,
    /// Logs every frame instead of creating a device
    Debug,
}

impl Display for TargetDeviceTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetDeviceTypeId::Xb360 => write!(f, "xb360"),
            TargetDeviceTypeId::Debug => write!(f, "debug"),
        }
    }
}

/// A [TargetDevice] is any virtual input device that corrected state is
/// written to
#[derive(Debug)]
pub enum TargetDevice {
    XBox360(xb360::XBox360Controller),
    Debug(debug::DebugGamepad),
}

impl TargetDevice {
    /// Create the target device of the given kind
    pub fn create(kind: TargetDeviceTypeId, config: &DriftConfig) -> Result<Self, OutputError> {
        let device = match kind {
            TargetDeviceTypeId::Xb360 => {
                TargetDevice::XBox360(xb360::XBox360Controller::new(&config.target_name)?)
            }
            TargetDeviceTypeId::Debug => TargetDevice::Debug(debug::DebugGamepad::new()),
        };
        Ok(device)
    }

    fn sink(&mut self) -> &mut dyn OutputSink {
        match self {
            TargetDevice::XBox360(device) => device,
            TargetDevice::Debug(device) => device,
        }
    }
}

impl OutputSink for TargetDevice {
    fn left_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError> {
        self.sink().left_stick(x, y)
    }

    fn right_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError> {
        self.sink().right_stick(x, y)
    }

    fn left_trigger(&mut self, value: u8) -> Result<(), OutputError> {
        self.sink().left_trigger(value)
    }

    fn right_trigger(&mut self, value: u8) -> Result<(), OutputError> {
        self.sink().right_trigger(value)
    }

    fn press(&mut self, button: GamepadButton) -> Result<(), OutputError> {
        self.sink().press(button)
    }

    fn release(&mut self, button: GamepadButton) -> Result<(), OutputError> {
        self.sink().release(button)
    }

    fn commit(&mut self) -> Result<(), OutputError> {
        self.sink().commit()
    }

    fn reset(&mut self) -> Result<(), OutputError> {
        self.sink().reset()
    }

    fn close(&mut self) -> Result<(), OutputError> {
        self.sink().close()
    }
}
