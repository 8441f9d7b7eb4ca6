//! Per-tick snapshots of controller state before and after correction.

use std::ops::BitOr;

use super::capability::GamepadButton;

/// Maximum number of analog axes read from the physical device (4 stick
/// axes followed by 2 triggers)
pub const MAX_AXES: usize = 6;
/// Raw axis index of the left trigger
pub const LEFT_TRIGGER_AXIS: usize = 4;
/// Raw axis index of the right trigger
pub const RIGHT_TRIGGER_AXIS: usize = 5;

/// State of a digital directional input where each coordinate is -1, 0 or 1.
/// Positive Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Hat {
    pub x: i8,
    pub y: i8,
}

impl Hat {
    pub const CENTER: Hat = Hat { x: 0, y: 0 };

    /// Create a new [Hat], reducing each coordinate to its sign
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.signum() as i8,
            y: y.signum() as i8,
        }
    }

    pub fn is_centered(&self) -> bool {
        *self == Hat::CENTER
    }
}

/// Bitmask of pressed D-pad directions. Diagonals set two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DirectionMask(u8);

impl DirectionMask {
    pub const NONE: DirectionMask = DirectionMask(0x00);
    pub const UP: DirectionMask = DirectionMask(0x01);
    pub const DOWN: DirectionMask = DirectionMask(0x02);
    pub const LEFT: DirectionMask = DirectionMask(0x04);
    pub const RIGHT: DirectionMask = DirectionMask(0x08);

    pub const fn union(self, other: DirectionMask) -> DirectionMask {
        DirectionMask(self.0 | other.0)
    }

    pub fn contains(&self, other: DirectionMask) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Look up the directions pressed for the given hat state
    pub fn from_hat(hat: Hat) -> DirectionMask {
        HAT_DIRECTIONS
            .iter()
            .find(|(position, _)| *position == hat)
            .map(|(_, mask)| *mask)
            .unwrap_or(DirectionMask::NONE)
    }
}

impl BitOr for DirectionMask {
    type Output = DirectionMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Directions pressed for each non-center hat position
pub const HAT_DIRECTIONS: [(Hat, DirectionMask); 8] = [
    (Hat { x: 0, y: 1 }, DirectionMask::UP),
    (Hat { x: 0, y: -1 }, DirectionMask::DOWN),
    (Hat { x: -1, y: 0 }, DirectionMask::LEFT),
    (Hat { x: 1, y: 0 }, DirectionMask::RIGHT),
    (Hat { x: 1, y: 1 }, DirectionMask::UP.union(DirectionMask::RIGHT)),
    (Hat { x: -1, y: 1 }, DirectionMask::UP.union(DirectionMask::LEFT)),
    (Hat { x: 1, y: -1 }, DirectionMask::DOWN.union(DirectionMask::RIGHT)),
    (Hat { x: -1, y: -1 }, DirectionMask::DOWN.union(DirectionMask::LEFT)),
];

/// Output capability for each direction bit
pub const DIRECTION_BUTTONS: [(DirectionMask, GamepadButton); 4] = [
    (DirectionMask::UP, GamepadButton::DPadUp),
    (DirectionMask::DOWN, GamepadButton::DPadDown),
    (DirectionMask::LEFT, GamepadButton::DPadLeft),
    (DirectionMask::RIGHT, GamepadButton::DPadRight),
];

/// Snapshot of the physical device for one polling tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFrame {
    /// Up to [MAX_AXES] axis values in the range -1.0 to 1.0
    pub axes: Vec<f64>,
    /// Button states indexed by physical button number
    pub buttons: Vec<bool>,
    /// State of the first hat, centered if the device has none
    pub hat: Hat,
}

impl RawFrame {
    /// Returns the value of the given axis if the device reported it
    pub fn axis(&self, index: usize) -> Option<f64> {
        self.axes.get(index).copied()
    }

    /// Returns the state of the given button, false if it is not present
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or_default()
    }
}

/// Corrected state derived from a [RawFrame], ready to be written to the
/// virtual device. Stick Y axes are positive when pushed up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrectedFrame {
    pub left_stick: (f64, f64),
    pub right_stick: (f64, f64),
    /// Trigger values in the range 0.0 to 1.0
    pub left_trigger: f64,
    pub right_trigger: f64,
    pub directions: DirectionMask,
    /// State of every mapped button
    pub buttons: Vec<(GamepadButton, bool)>,
}

impl CorrectedFrame {
    /// Returns true if the given button is pressed in this frame. D-pad buttons
    /// are resolved from the direction mask.
    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        if let Some((mask, _)) = DIRECTION_BUTTONS.iter().find(|(_, b)| *b == button) {
            return self.directions.contains(*mask);
        }
        self.buttons
            .iter()
            .any(|(mapped, pressed)| *mapped == button && *pressed)
    }
}
