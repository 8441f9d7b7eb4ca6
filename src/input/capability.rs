/// A capability describes what kind of input a virtual device is capable
/// of emitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Gamepad(Gamepad),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gamepad {
    Button(GamepadButton),
    Axis(GamepadAxis),
    Trigger(GamepadTrigger),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamepadButton {
    /// South action, Sony Cross x, Xbox A, Nintendo B
    South,
    /// East action, Sony Circle ◯, Xbox B, Nintendo A
    East,
    /// North action, Sony Square □, Xbox X, Nintendo Y
    North,
    /// West action, Sony Triangle ∆, XBox Y, Nintendo X
    West,
    LeftBumper,
    RightBumper,
    Select,
    Start,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl GamepadButton {
    /// Every button the virtual gamepad can press
    pub const ALL: [GamepadButton; 14] = [
        GamepadButton::South,
        GamepadButton::East,
        GamepadButton::North,
        GamepadButton::West,
        GamepadButton::LeftBumper,
        GamepadButton::RightBumper,
        GamepadButton::Select,
        GamepadButton::Start,
        GamepadButton::LeftStick,
        GamepadButton::RightStick,
        GamepadButton::DPadUp,
        GamepadButton::DPadDown,
        GamepadButton::DPadLeft,
        GamepadButton::DPadRight,
    ];

    pub fn is_dpad(&self) -> bool {
        matches!(
            self,
            GamepadButton::DPadUp
                | GamepadButton::DPadDown
                | GamepadButton::DPadLeft
                | GamepadButton::DPadRight
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStick,
    RightStick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadTrigger {
    LeftTrigger,
    RightTrigger,
}

impl From<GamepadButton> for Capability {
    fn from(button: GamepadButton) -> Self {
        Capability::Gamepad(Gamepad::Button(button))
    }
}

/// Returns all the capabilities the virtual gamepad can emit
pub fn gamepad_capabilities() -> Vec<Capability> {
    let mut capabilities: Vec<Capability> =
        GamepadButton::ALL.iter().map(|b| (*b).into()).collect();
    capabilities.push(Capability::Gamepad(Gamepad::Axis(GamepadAxis::LeftStick)));
    capabilities.push(Capability::Gamepad(Gamepad::Axis(GamepadAxis::RightStick)));
    capabilities.push(Capability::Gamepad(Gamepad::Trigger(
        GamepadTrigger::LeftTrigger,
    )));
    capabilities.push(Capability::Gamepad(Gamepad::Trigger(
        GamepadTrigger::RightTrigger,
    )));
    capabilities
}
