use std::fmt::Debug;
use std::{collections::HashMap, os::fd::AsRawFd, path::PathBuf};

use evdev::{AbsInfo, AbsoluteAxisCode, AttributeSet, Device, KeyCode};
use nix::fcntl::{FcntlArg, OFlag};

use crate::input::{
    frame::Hat,
    source::{InputError, InputSource},
};

use super::{
    find_gamepads, is_gamepad, normalize_signed_value, normalize_trigger_value, read_error,
    supported_prefix_len, supported_span_len, AxisKind, AXIS_LAYOUT, BUTTON_LAYOUT,
};

/// Source device implementation for evdev gamepads
pub struct GamepadEventDevice {
    device: Device,
    path: PathBuf,
    name: String,
    axis_count: usize,
    button_count: usize,
    has_hat: bool,
    axes_info: HashMap<AbsoluteAxisCode, AbsInfo>,
    key_state: AttributeSet<KeyCode>,
}

impl GamepadEventDevice {
    /// Open the gamepad at the given path, or the first gamepad found if no
    /// path is given. Devices named `exclude_name` are never selected.
    pub fn open(path: Option<&str>, exclude_name: &str) -> Result<Self, InputError> {
        let (path, device) = match path {
            Some(path) => {
                log::debug!("Opening device at: {}", path);
                let device = Device::open(path).map_err(|e| {
                    log::error!("Unable to open {path}: {e}");
                    InputError::DeviceNotFound
                })?;
                if !is_gamepad(&device) {
                    log::error!("Device at {path} is not a gamepad");
                    return Err(InputError::DeviceNotFound);
                }
                (PathBuf::from(path), device)
            }
            None => {
                let Some(found) = find_gamepads(exclude_name).into_iter().next() else {
                    return Err(InputError::DeviceNotFound);
                };
                found
            }
        };

        Self::from_device(path, device)
    }

    /// Take exclusive ownership of the given device and switch it to
    /// non-blocking reads
    fn from_device(path: PathBuf, mut device: Device) -> Result<Self, InputError> {
        let name = device.name().unwrap_or("Unknown Gamepad").to_string();
        device.grab().map_err(read_error)?;

        // Set the device to do non-blocking reads
        let raw_fd = device.as_raw_fd();
        nix::fcntl::fcntl(raw_fd, FcntlArg::F_SETFL(OFlag::O_NONBLOCK))
            .map_err(|e| InputError::ReadFailure(e.to_string()))?;

        let axis_count = match device.supported_absolute_axes() {
            Some(axes) => supported_prefix_len(&AXIS_LAYOUT, |(code, _)| axes.contains(*code)),
            None => 0,
        };
        let button_count = match device.supported_keys() {
            Some(keys) => supported_span_len(&BUTTON_LAYOUT, |code| keys.contains(*code)),
            None => 0,
        };
        let has_hat = device
            .supported_absolute_axes()
            .is_some_and(|axes| axes.contains(AbsoluteAxisCode::ABS_HAT0X));
        log::debug!(
            "Opened {name} at {path:?} with {axis_count} axes, {button_count} buttons, hat: {has_hat}"
        );

        let mut gamepad = Self {
            device,
            path,
            name,
            axis_count,
            button_count,
            has_hat,
            axes_info: HashMap::new(),
            key_state: AttributeSet::new(),
        };
        gamepad.refresh_state()?;

        Ok(gamepad)
    }

    /// Returns the path to the device node
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read and discard all queued events. Only the current device state is
    /// used, but the queue must not be left to overflow.
    fn drain_events(&mut self) -> Result<usize, InputError> {
        let mut count = 0;
        loop {
            match self.device.fetch_events() {
                Ok(events) => {
                    let fetched = events.count();
                    if fetched == 0 {
                        break;
                    }
                    count += fetched;
                }
                Err(err) => match err.kind() {
                    // Do nothing if this would block
                    std::io::ErrorKind::WouldBlock => break,
                    _ => {
                        log::trace!("Failed to fetch events: {:?}", err);
                        return Err(read_error(err));
                    }
                },
            }
        }
        Ok(count)
    }

    /// Query the current absolute axis and key state
    fn refresh_state(&mut self) -> Result<(), InputError> {
        self.axes_info = self.device.get_absinfo().map_err(read_error)?.collect();
        self.key_state = self.device.get_key_state().map_err(read_error)?;
        Ok(())
    }

    /// Value of the given absolute axis, or [None] if the device does not report it
    fn abs_value(&self, code: AbsoluteAxisCode) -> Option<i32> {
        self.axes_info.get(&code).map(|info| info.value())
    }
}

impl InputSource for GamepadEventDevice {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn poll(&mut self) -> Result<(), InputError> {
        let drained = self.drain_events()?;
        log::trace!("Drained {drained} events");
        self.refresh_state()
    }

    fn axis_count(&self) -> usize {
        self.axis_count
    }

    fn axis(&self, index: usize) -> f64 {
        let Some((code, kind)) = AXIS_LAYOUT.get(index) else {
            return 0.0;
        };
        let Some(info) = self.axes_info.get(code) else {
            return 0.0;
        };
        match kind {
            AxisKind::Stick => normalize_signed_value(info.value(), info.minimum(), info.maximum()),
            AxisKind::Trigger => {
                normalize_trigger_value(info.value(), info.minimum(), info.maximum())
            }
        }
    }

    fn button_count(&self) -> usize {
        self.button_count
    }

    fn button(&self, index: usize) -> bool {
        BUTTON_LAYOUT
            .get(index)
            .is_some_and(|code| self.key_state.contains(*code))
    }

    fn hat_count(&self) -> usize {
        usize::from(self.has_hat)
    }

    fn hat(&self, index: usize) -> Hat {
        if index != 0 || !self.has_hat {
            return Hat::CENTER;
        }
        let x = self.abs_value(AbsoluteAxisCode::ABS_HAT0X).unwrap_or_default();
        let y = self.abs_value(AbsoluteAxisCode::ABS_HAT0Y).unwrap_or_default();
        // evdev reports up as negative
        Hat::new(x, -y)
    }
}

impl Debug for GamepadEventDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadEventDevice")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("axis_count", &self.axis_count)
            .field("button_count", &self.button_count)
            .field("has_hat", &self.has_hat)
            .finish()
    }
}
