//! The DebugGamepad target keeps the same state as a virtual gamepad but
//! logs every change instead of writing to a device.
use crate::input::capability::{gamepad_capabilities, GamepadButton};

use super::{GamepadState, OutputError, OutputSink};

#[derive(Debug, Default)]
pub struct DebugGamepad {
    pending: GamepadState,
    committed: GamepadState,
    commits: u64,
    resets: u64,
    closed: bool,
}

impl DebugGamepad {
    pub fn new() -> Self {
        log::debug!("Debug gamepad capabilities: {:?}", gamepad_capabilities());
        Self::default()
    }

    /// Returns the state that was last committed
    pub fn committed(&self) -> &GamepadState {
        &self.committed
    }

    /// Returns the number of commits
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Returns the number of resets
    pub fn reset_count(&self) -> u64 {
        self.resets
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn pending_mut(&mut self) -> Result<&mut GamepadState, OutputError> {
        if self.closed {
            return Err(OutputError::Closed);
        }
        Ok(&mut self.pending)
    }
}

impl OutputSink for DebugGamepad {
    fn left_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError> {
        self.pending_mut()?.left_stick = (x, y);
        Ok(())
    }

    fn right_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError> {
        self.pending_mut()?.right_stick = (x, y);
        Ok(())
    }

    fn left_trigger(&mut self, value: u8) -> Result<(), OutputError> {
        self.pending_mut()?.left_trigger = value;
        Ok(())
    }

    fn right_trigger(&mut self, value: u8) -> Result<(), OutputError> {
        self.pending_mut()?.right_trigger = value;
        Ok(())
    }

    fn press(&mut self, button: GamepadButton) -> Result<(), OutputError> {
        self.pending_mut()?.set_button(button, true);
        Ok(())
    }

    fn release(&mut self, button: GamepadButton) -> Result<(), OutputError> {
        self.pending_mut()?.set_button(button, false);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), OutputError> {
        if self.closed {
            return Err(OutputError::Closed);
        }
        self.commits += 1;
        if self.pending == self.committed {
            log::trace!("Frame {} unchanged", self.commits);
            return Ok(());
        }
        self.committed = self.pending.clone();
        let state = &self.committed;
        log::info!(
            "Frame {}: left={:?} right={:?} triggers=({}, {}) pressed={:?}",
            self.commits,
            state.left_stick,
            state.right_stick,
            state.left_trigger,
            state.right_trigger,
            state.pressed
        );
        Ok(())
    }

    fn reset(&mut self) -> Result<(), OutputError> {
        if self.closed {
            return Ok(());
        }
        self.resets += 1;
        self.pending = GamepadState::default();
        self.commit()
    }

    fn close(&mut self) -> Result<(), OutputError> {
        self.closed = true;
        Ok(())
    }
}
