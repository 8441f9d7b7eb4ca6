pub mod gamepad;

use std::{io, path::PathBuf};

use evdev::{AbsoluteAxisCode, Device, KeyCode};

use super::InputError;

/// Raw evdev errno reported when the device node goes away
const ENODEV: i32 = nix::errno::Errno::ENODEV as i32;

/// How a physical axis is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Centered axis normalized to -1.0 to 1.0
    Stick,
    /// Axis at rest at its minimum, normalized to -1.0 (released) to
    /// 1.0 (fully pressed)
    Trigger,
}

/// Physical axes in the order they appear in a raw frame
pub const AXIS_LAYOUT: [(AbsoluteAxisCode, AxisKind); 6] = [
    (AbsoluteAxisCode::ABS_X, AxisKind::Stick),
    (AbsoluteAxisCode::ABS_Y, AxisKind::Stick),
    (AbsoluteAxisCode::ABS_RX, AxisKind::Stick),
    (AbsoluteAxisCode::ABS_RY, AxisKind::Stick),
    (AbsoluteAxisCode::ABS_Z, AxisKind::Trigger),
    (AbsoluteAxisCode::ABS_RZ, AxisKind::Trigger),
];

/// Physical buttons in the order they appear in a raw frame
pub const BUTTON_LAYOUT: [KeyCode; 10] = [
    KeyCode::BTN_SOUTH,
    KeyCode::BTN_EAST,
    KeyCode::BTN_NORTH,
    KeyCode::BTN_WEST,
    KeyCode::BTN_TL,
    KeyCode::BTN_TR,
    KeyCode::BTN_SELECT,
    KeyCode::BTN_START,
    KeyCode::BTN_THUMBL,
    KeyCode::BTN_THUMBR,
];

/// Returns true if the given device looks like a gamepad
pub fn is_gamepad(device: &Device) -> bool {
    let has_south = device
        .supported_keys()
        .is_some_and(|keys| keys.contains(KeyCode::BTN_SOUTH));
    let has_stick = device
        .supported_absolute_axes()
        .is_some_and(|axes| axes.contains(AbsoluteAxisCode::ABS_X));
    has_south && has_stick
}

/// Returns all gamepads found in the input event subsystem, skipping any
/// device with the given name.
pub fn find_gamepads(exclude_name: &str) -> Vec<(PathBuf, Device)> {
    let mut gamepads: Vec<(PathBuf, Device)> = evdev::enumerate()
        .filter(|(path, device)| {
            let name = device.name().unwrap_or_default();
            log::trace!("Found input device {name} at {path:?}");
            name != exclude_name && is_gamepad(device)
        })
        .collect();
    gamepads.sort_by(|(a, _), (b, _)| a.cmp(b));
    gamepads
}

/// Length of the longest prefix of `layout` where every entry is supported
pub fn supported_prefix_len<T>(layout: &[T], supported: impl Fn(&T) -> bool) -> usize {
    layout.iter().take_while(|entry| supported(*entry)).count()
}

/// Number of entries up to and including the last supported one
pub fn supported_span_len<T>(layout: &[T], supported: impl Fn(&T) -> bool) -> usize {
    layout
        .iter()
        .rposition(supported)
        .map(|i| i + 1)
        .unwrap_or_default()
}

/// Map a failed device read into an [InputError]
pub fn read_error(err: io::Error) -> InputError {
    if err.raw_os_error() == Some(ENODEV) {
        return InputError::Disconnected(err.to_string());
    }
    InputError::ReadFailure(err.to_string())
}

/// Returns a value between -1.0 and 1.0 based on the given value with its
/// minimum and maximum values.
pub fn normalize_signed_value(raw_value: i32, min: i32, max: i32) -> f64 {
    let mid = (max + min) / 2;
    let event_value = raw_value - mid;

    let min = min as f64;
    let max = max as f64;
    let mid = mid as f64;
    let event_value = event_value as f64;

    // Normalize the value
    let value = if event_value >= 0.0 {
        let maximum = max - mid;
        if maximum == 0.0 {
            return 0.0;
        }
        event_value / maximum
    } else {
        let minimum = min - mid;
        if minimum == 0.0 {
            return 0.0;
        }
        -(event_value / minimum)
    };
    value.clamp(-1.0, 1.0)
}

/// Returns a value between 0.0 and 1.0 based on the given value with its
/// minimum and maximum values.
pub fn normalize_unsigned_value(raw_value: i32, min: i32, max: i32) -> f64 {
    if max <= min {
        return 0.0;
    }
    let value = (raw_value - min) as f64 / (max - min) as f64;
    value.clamp(0.0, 1.0)
}

/// Normalize a trigger so that released reads -1.0 and fully pressed 1.0
pub fn normalize_trigger_value(raw_value: i32, min: i32, max: i32) -> f64 {
    normalize_unsigned_value(raw_value, min, max) * 2.0 - 1.0
}
