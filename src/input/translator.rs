use crate::{
    config::DriftConfig,
    drift::{corrector::AxisCorrector, StickAxis},
};

use super::{
    capability::GamepadButton,
    frame::{
        CorrectedFrame, DirectionMask, RawFrame, DIRECTION_BUTTONS, LEFT_TRIGGER_AXIS,
        RIGHT_TRIGGER_AXIS,
    },
    target::{OutputError, OutputSink},
};

/// Output capability for each physical button index
pub const BUTTON_MAP: [GamepadButton; 10] = [
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
];

/// Maximum trigger value on the virtual device
pub const MAX_TRIGGER_VALUE: u8 = u8::MAX;

/// Scale a stick value from -1.0 to 1.0 into the virtual stick range,
/// truncating toward zero
pub fn scale_stick(value: f64, max_axis_value: i16) -> i16 {
    (value.clamp(-1.0, 1.0) * max_axis_value as f64) as i16
}

/// Scale a trigger value from 0.0 to 1.0 into the virtual trigger range,
/// truncating toward zero
pub fn scale_trigger(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * MAX_TRIGGER_VALUE as f64) as u8
}

/// Rescale a raw trigger from -1.0 to 1.0 into 0.0 to 1.0
pub fn trigger_value(raw_value: f64) -> f64 {
    if !raw_value.is_finite() {
        return 0.0;
    }
    ((raw_value + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// The [FrameTranslator] turns one raw frame per tick into corrected state and
/// writes it to a virtual device.
#[derive(Debug, Clone)]
pub struct FrameTranslator {
    corrector: AxisCorrector,
    max_axis_value: i16,
}

impl FrameTranslator {
    pub fn new(corrector: AxisCorrector, max_axis_value: i16) -> Self {
        Self {
            corrector,
            max_axis_value,
        }
    }

    /// Create a new [FrameTranslator] from the given configuration
    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(AxisCorrector::from_config(config), config.max_axis_value)
    }

    /// Returns the axis corrector used by this translator
    pub fn corrector(&self) -> &AxisCorrector {
        &self.corrector
    }

    /// Correct the given raw frame. Stick Y axes are inverted so that up is
    /// positive.
    pub fn correct(&mut self, raw: &RawFrame) -> CorrectedFrame {
        let left_stick = (
            self.stick(raw, StickAxis::LeftX),
            self.stick(raw, StickAxis::LeftY),
        );
        let right_stick = (
            self.stick(raw, StickAxis::RightX),
            self.stick(raw, StickAxis::RightY),
        );

        let left_trigger = raw
            .axis(LEFT_TRIGGER_AXIS)
            .map(trigger_value)
            .unwrap_or_default();
        let right_trigger = raw
            .axis(RIGHT_TRIGGER_AXIS)
            .map(trigger_value)
            .unwrap_or_default();

        let buttons = BUTTON_MAP
            .iter()
            .take(raw.buttons.len())
            .enumerate()
            .map(|(i, button)| (*button, raw.button(i)))
            .collect();

        CorrectedFrame {
            left_stick,
            right_stick,
            left_trigger,
            right_trigger,
            directions: DirectionMask::from_hat(raw.hat),
            buttons,
        }
    }

    /// Correct a single stick axis, or return 0.0 if the device did not
    /// report it
    fn stick(&mut self, raw: &RawFrame, axis: StickAxis) -> f64 {
        let Some(raw_value) = raw.axis(axis.index()) else {
            return 0.0;
        };
        let value = self.corrector.correct(axis, raw_value);
        if axis.is_vertical() {
            -value
        } else {
            value
        }
    }

    /// Write the given corrected frame to the sink and commit it
    pub fn emit(&self, frame: &CorrectedFrame, sink: &mut dyn OutputSink) -> Result<(), OutputError> {
        let max = self.max_axis_value;
        sink.left_stick(
            scale_stick(frame.left_stick.0, max),
            scale_stick(frame.left_stick.1, max),
        )?;
        sink.right_stick(
            scale_stick(frame.right_stick.0, max),
            scale_stick(frame.right_stick.1, max),
        )?;
        sink.left_trigger(scale_trigger(frame.left_trigger))?;
        sink.right_trigger(scale_trigger(frame.right_trigger))?;

        for (button, pressed) in frame.buttons.iter() {
            if *pressed {
                sink.press(*button)?;
            } else {
                sink.release(*button)?;
            }
        }

        // Each direction is set independently so diagonals press two buttons
        for (mask, button) in DIRECTION_BUTTONS {
            if frame.directions.contains(mask) {
                sink.press(button)?;
            } else {
                sink.release(button)?;
            }
        }

        sink.commit()
    }

    /// Correct the given raw frame and write it to the sink
    pub fn translate(
        &mut self,
        raw: &RawFrame,
        sink: &mut dyn OutputSink,
    ) -> Result<CorrectedFrame, OutputError> {
        let frame = self.correct(raw);
        log::trace!("Corrected frame: {frame:?}");
        self.emit(&frame, sink)?;
        Ok(frame)
    }
}
