//! Drift correction for analog stick axes.
//!
//! Raw stick samples flow through an [corrector::AxisCorrector], which
//! removes the measured rest-position bias from a [model::BiasModel], applies
//! the per-axis deadzone, and consults a [motion::MotionDetector] so that
//! small deliberate movements are not swallowed by the deadzone.

pub mod corrector;
#[cfg(test)]
pub mod corrector_test;
pub mod history;
pub mod model;
pub mod motion;

/// Number of analog stick axes that carry a drift estimate
pub const STICK_AXES: usize = 4;

/// One of the four analog stick axes, in the order the physical device
/// reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl StickAxis {
    pub const ALL: [StickAxis; STICK_AXES] = [
        StickAxis::LeftX,
        StickAxis::LeftY,
        StickAxis::RightX,
        StickAxis::RightY,
    ];

    /// Returns the axis for the given raw axis index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the raw axis index of this axis
    pub fn index(&self) -> usize {
        match self {
            StickAxis::LeftX => 0,
            StickAxis::LeftY => 1,
            StickAxis::RightX => 2,
            StickAxis::RightY => 3,
        }
    }

    /// Y axes report "up" as negative on the physical device
    pub fn is_vertical(&self) -> bool {
        matches!(self, StickAxis::LeftY | StickAxis::RightY)
    }
}
