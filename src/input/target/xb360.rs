//! The XBox360Controller target provides a virtual uinput gamepad based
//! on the XBox 360 gamepad.
use std::fmt::Debug;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AbsInfo, AbsoluteAxisCode, AttributeSet, EventType, InputEvent, KeyCode, SynchronizationCode,
    SynchronizationEvent, UinputAbsSetup,
};

use crate::input::capability::GamepadButton;

use super::{GamepadState, OutputError, OutputSink};

pub struct XBox360Controller {
    name: String,
    device: Option<VirtualDevice>,
    pending: GamepadState,
    committed: Option<GamepadState>,
}

impl XBox360Controller {
    /// Create the virtual device with the given name
    pub fn new(name: &str) -> Result<Self, OutputError> {
        log::debug!("Creating virtual gamepad: {name}");
        let device = Self::create_virtual_device(name)?;
        Ok(Self {
            name: name.to_string(),
            device: Some(device),
            pending: GamepadState::default(),
            committed: None,
        })
    }

    /// Create the virtual device to emulate
    fn create_virtual_device(name: &str) -> Result<VirtualDevice, std::io::Error> {
        // Setup Key inputs
        let mut keys = AttributeSet::<KeyCode>::new();
        keys.insert(KeyCode::BTN_SOUTH);
        keys.insert(KeyCode::BTN_EAST);
        keys.insert(KeyCode::BTN_NORTH);
        keys.insert(KeyCode::BTN_WEST);
        keys.insert(KeyCode::BTN_TL);
        keys.insert(KeyCode::BTN_TR);
        keys.insert(KeyCode::BTN_SELECT);
        keys.insert(KeyCode::BTN_START);
        keys.insert(KeyCode::BTN_MODE);
        keys.insert(KeyCode::BTN_THUMBL);
        keys.insert(KeyCode::BTN_THUMBR);

        // Setup ABS inputs
        let joystick_setup = AbsInfo::new(0, -32768, 32767, 16, 128, 1);
        let abs_x = UinputAbsSetup::new(AbsoluteAxisCode::ABS_X, joystick_setup);
        let abs_y = UinputAbsSetup::new(AbsoluteAxisCode::ABS_Y, joystick_setup);
        let abs_rx = UinputAbsSetup::new(AbsoluteAxisCode::ABS_RX, joystick_setup);
        let abs_ry = UinputAbsSetup::new(AbsoluteAxisCode::ABS_RY, joystick_setup);
        let triggers_setup = AbsInfo::new(0, 0, 255, 0, 0, 1);
        let abs_z = UinputAbsSetup::new(AbsoluteAxisCode::ABS_Z, triggers_setup);
        let abs_rz = UinputAbsSetup::new(AbsoluteAxisCode::ABS_RZ, triggers_setup);
        let dpad_setup = AbsInfo::new(0, -1, 1, 0, 0, 1);
        let abs_hat0x = UinputAbsSetup::new(AbsoluteAxisCode::ABS_HAT0X, dpad_setup);
        let abs_hat0y = UinputAbsSetup::new(AbsoluteAxisCode::ABS_HAT0Y, dpad_setup);

        // Build the device
        let device = VirtualDeviceBuilder::new()?
            .name(name)
            .with_keys(&keys)?
            .with_absolute_axis(&abs_x)?
            .with_absolute_axis(&abs_y)?
            .with_absolute_axis(&abs_rx)?
            .with_absolute_axis(&abs_ry)?
            .with_absolute_axis(&abs_z)?
            .with_absolute_axis(&abs_rz)?
            .with_absolute_axis(&abs_hat0x)?
            .with_absolute_axis(&abs_hat0y)?
            .build()?;

        Ok(device)
    }

    fn pending_mut(&mut self) -> Result<&mut GamepadState, OutputError> {
        if self.device.is_none() {
            return Err(OutputError::Closed);
        }
        Ok(&mut self.pending)
    }
}

/// Returns the key code for the given button. D-pad buttons are emitted as
/// hat axes and have no key code.
pub fn button_code(button: GamepadButton) -> Option<KeyCode> {
    let code = match button {
        GamepadButton::South => KeyCode::BTN_SOUTH,
        GamepadButton::East => KeyCode::BTN_EAST,
        GamepadButton::North => KeyCode::BTN_NORTH,
        GamepadButton::West => KeyCode::BTN_WEST,
        GamepadButton::LeftBumper => KeyCode::BTN_TL,
        GamepadButton::RightBumper => KeyCode::BTN_TR,
        GamepadButton::Select => KeyCode::BTN_SELECT,
        GamepadButton::Start => KeyCode::BTN_START,
        GamepadButton::LeftStick => KeyCode::BTN_THUMBL,
        GamepadButton::RightStick => KeyCode::BTN_THUMBR,
        GamepadButton::DPadUp
        | GamepadButton::DPadDown
        | GamepadButton::DPadLeft
        | GamepadButton::DPadRight => return None,
    };
    Some(code)
}

/// Returns the value of every absolute axis for the given state. Stick Y is
/// flipped since evdev reports up as negative.
pub fn abs_values(state: &GamepadState) -> [(AbsoluteAxisCode, i32); 8] {
    let flip = |value: i16| (-(value as i32)).min(i16::MAX as i32);
    let direction = |negative: GamepadButton, positive: GamepadButton| {
        state.is_pressed(positive) as i32 - state.is_pressed(negative) as i32
    };
    [
        (AbsoluteAxisCode::ABS_X, state.left_stick.0 as i32),
        (AbsoluteAxisCode::ABS_Y, flip(state.left_stick.1)),
        (AbsoluteAxisCode::ABS_RX, state.right_stick.0 as i32),
        (AbsoluteAxisCode::ABS_RY, flip(state.right_stick.1)),
        (AbsoluteAxisCode::ABS_Z, state.left_trigger as i32),
        (AbsoluteAxisCode::ABS_RZ, state.right_trigger as i32),
        (
            AbsoluteAxisCode::ABS_HAT0X,
            direction(GamepadButton::DPadLeft, GamepadButton::DPadRight),
        ),
        (
            AbsoluteAxisCode::ABS_HAT0Y,
            direction(GamepadButton::DPadUp, GamepadButton::DPadDown),
        ),
    ]
}

/// Build the evdev events that move the device from the previous state to the
/// next one. Every value is emitted if there is no previous state.
pub fn state_events(previous: Option<&GamepadState>, next: &GamepadState) -> Vec<InputEvent> {
    let mut events = Vec::new();

    for button in GamepadButton::ALL {
        let Some(code) = button_code(button) else {
            continue;
        };
        let pressed = next.is_pressed(button);
        if previous.is_some_and(|prev| prev.is_pressed(button) == pressed) {
            continue;
        }
        events.push(InputEvent::new(EventType::KEY.0, code.0, pressed as i32));
    }

    let previous_values = previous.map(abs_values);
    for (i, (axis, value)) in abs_values(next).into_iter().enumerate() {
        if previous_values.is_some_and(|prev| prev[i].1 == value) {
            continue;
        }
        events.push(InputEvent::new(EventType::ABSOLUTE.0, axis.0, value));
    }

    events
}

impl OutputSink for XBox360Controller {
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
        let Some(device) = self.device.as_mut() else {
            return Err(OutputError::Closed);
        };

        let mut events = state_events(self.committed.as_ref(), &self.pending);
        if events.is_empty() {
            return Ok(());
        }
        events.push(SynchronizationEvent::new(SynchronizationCode::SYN_REPORT, 0).into());
        log::trace!("Emitting {} events", events.len());
        device.emit(events.as_slice())?;
        self.committed = Some(self.pending.clone());

        Ok(())
    }

    fn reset(&mut self) -> Result<(), OutputError> {
        if self.device.is_none() {
            return Ok(());
        }
        log::debug!("Resetting virtual gamepad: {}", self.name);
        self.pending = GamepadState::default();
        self.commit()
    }

    fn close(&mut self) -> Result<(), OutputError> {
        if self.device.take().is_some() {
            log::debug!("Destroyed virtual gamepad: {}", self.name);
        }
        Ok(())
    }
}

impl Debug for XBox360Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XBox360Controller")
            .field("name", &self.name)
            .field("open", &self.device.is_some())
            .field("pending", &self.pending)
            .field("committed", &self.committed)
            .finish()
    }
}
