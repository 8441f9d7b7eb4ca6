pub mod evdev;
#[cfg(test)]
pub mod evdev_test;

use thiserror::Error;

use super::frame::{Hat, RawFrame, MAX_AXES};

/// Possible errors reading from a source device
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("no supported controller was found")]
    DeviceNotFound,
    #[error("device was disconnected: {0}")]
    Disconnected(String),
    #[error("failed to read device state: {0}")]
    ReadFailure(String),
}

impl InputError {
    /// Returns true if this error may clear up on a later read
    pub fn is_transient(&self) -> bool {
        matches!(self, InputError::ReadFailure(_))
    }
}

/// An [InputSource] is a physical controller whose state can be polled once
/// per tick. Values are only refreshed by [InputSource::poll].
pub trait InputSource {
    /// Human readable name of the device
    fn name(&self) -> String;

    /// Refresh the device state
    fn poll(&mut self) -> Result<(), InputError>;

    /// Number of analog axes available
    fn axis_count(&self) -> usize;

    /// Value of the given axis in the range -1.0 to 1.0
    fn axis(&self, index: usize) -> f64;

    /// Number of buttons available
    fn button_count(&self) -> usize;

    /// Returns true if the given button is held
    fn button(&self, index: usize) -> bool;

    /// Number of hats available
    fn hat_count(&self) -> usize;

    /// State of the given hat. Positive Y is up.
    fn hat(&self, index: usize) -> Hat;

    /// Poll the device and return a snapshot of its current state
    fn read_frame(&mut self) -> Result<RawFrame, InputError> {
        self.poll()?;

        let axes = (0..self.axis_count().min(MAX_AXES))
            .map(|i| self.axis(i))
            .collect();
        let buttons = (0..self.button_count()).map(|i| self.button(i)).collect();
        let hat = if self.hat_count() > 0 {
            self.hat(0)
        } else {
            Hat::CENTER
        };

        Ok(RawFrame { axes, buttons, hat })
    }
}
