use std::error::Error;

use crate::{
    config::{DriftConfig, KNOWN_DRIFT},
    input::{
        capability::GamepadButton,
        frame::{DirectionMask, Hat, RawFrame},
        target::{debug::DebugGamepad, OutputError, OutputSink},
    },
};

use super::translator::{scale_stick, scale_trigger, trigger_value, FrameTranslator};

/// Sink that records every call in order
#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<String>,
}

impl OutputSink for Recorder {
    fn left_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError> {
        self.calls.push(format!("left_stick({x}, {y})"));
        Ok(())
    }

    fn right_stick(&mut self, x: i16, y: i16) -> Result<(), OutputError> {
        self.calls.push(format!("right_stick({x}, {y})"));
        Ok(())
    }

    fn left_trigger(&mut self, value: u8) -> Result<(), OutputError> {
        self.calls.push(format!("left_trigger({value})"));
        Ok(())
    }

    fn right_trigger(&mut self, value: u8) -> Result<(), OutputError> {
        self.calls.push(format!("right_trigger({value})"));
        Ok(())
    }

    fn press(&mut self, button: GamepadButton) -> Result<(), OutputError> {
        self.calls.push(format!("press({button:?})"));
        Ok(())
    }

    fn release(&mut self, button: GamepadButton) -> Result<(), OutputError> {
        self.calls.push(format!("release({button:?})"));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), OutputError> {
        self.calls.push("commit".to_string());
        Ok(())
    }

    fn reset(&mut self) -> Result<(), OutputError> {
        self.calls.push("reset".to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<(), OutputError> {
        self.calls.push("close".to_string());
        Ok(())
    }
}

fn rest_frame() -> RawFrame {
    let mut axes = KNOWN_DRIFT.to_vec();
    axes.extend([-1.0, -1.0]);
    RawFrame {
        axes,
        buttons: vec![false; 10],
        hat: Hat::CENTER,
    }
}

#[test]
fn test_rest_frame() -> Result<(), Box<dyn Error>> {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = DebugGamepad::new();

    let frame = translator.translate(&rest_frame(), &mut sink)?;
    assert_eq!(frame.left_stick, (0.0, 0.0));
    assert_eq!(frame.right_stick, (0.0, 0.0));
    assert_eq!(frame.left_trigger, 0.0, "Released trigger should read zero");
    assert_eq!(frame.right_trigger, 0.0);

    let state = sink.committed();
    assert_eq!(state.left_stick, (0, 0), "Drifting stick should be centered");
    assert_eq!(state.right_stick, (0, 0));
    assert_eq!(state.left_trigger, 0);
    assert_eq!(state.right_trigger, 0);
    assert!(state.pressed.is_empty());
    assert_eq!(sink.commit_count(), 1);

    Ok(())
}

#[test]
fn test_emit_order() -> Result<(), Box<dyn Error>> {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = Recorder::default();

    let mut raw = rest_frame();
    raw.buttons[0] = true;
    raw.hat = Hat::new(1, 1);
    translator.translate(&raw, &mut sink)?;

    let expected: Vec<String> = [
        "left_stick(0, 0)",
        "right_stick(0, 0)",
        "left_trigger(0)",
        "right_trigger(0)",
        "press(South)",
        "release(East)",
        "release(North)",
        "release(West)",
        "release(LeftBumper)",
        "release(RightBumper)",
        "release(Select)",
        "release(Start)",
        "release(LeftStick)",
        "release(RightStick)",
        "press(DPadUp)",
        "release(DPadDown)",
        "release(DPadLeft)",
        "press(DPadRight)",
        "commit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(sink.calls, expected);

    Ok(())
}

#[test]
fn test_diagonal_hat() -> Result<(), Box<dyn Error>> {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = DebugGamepad::new();

    let mut raw = rest_frame();
    raw.hat = Hat::new(1, 1);
    let frame = translator.translate(&raw, &mut sink)?;
    assert_eq!(frame.directions, DirectionMask::UP | DirectionMask::RIGHT);

    let state = sink.committed().clone();
    assert!(state.is_pressed(GamepadButton::DPadUp));
    assert!(state.is_pressed(GamepadButton::DPadRight));
    assert!(!state.is_pressed(GamepadButton::DPadDown));
    assert!(!state.is_pressed(GamepadButton::DPadLeft));
    assert_eq!(state.pressed.len(), 2, "Only up and right should be pressed");

    raw.hat = Hat::CENTER;
    translator.translate(&raw, &mut sink)?;
    assert!(
        sink.committed().pressed.is_empty(),
        "Centered hat should release all directions"
    );

    Ok(())
}

#[test]
fn test_button_mapping() -> Result<(), Box<dyn Error>> {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = DebugGamepad::new();

    let mut raw = rest_frame();
    raw.buttons = vec![true, false, false, false, false, false, false, true, false, true, true, true];
    let frame = translator.translate(&raw, &mut sink)?;
    assert_eq!(frame.buttons.len(), 10, "Unmapped buttons should be ignored");

    let pressed: Vec<GamepadButton> = sink.committed().pressed.iter().copied().collect();
    assert_eq!(
        pressed,
        vec![
            GamepadButton::South,
            GamepadButton::Start,
            GamepadButton::RightStick
        ]
    );

    raw.buttons = vec![false, true];
    let frame = translator.translate(&raw, &mut sink)?;
    assert_eq!(frame.buttons.len(), 2);
    let pressed: Vec<GamepadButton> = sink.committed().pressed.iter().copied().collect();
    assert_eq!(
        pressed,
        vec![
            GamepadButton::East,
            GamepadButton::Start,
            GamepadButton::RightStick
        ],
        "Buttons the device does not have are left untouched"
    );

    Ok(())
}

#[test]
fn test_stick_scaling() -> Result<(), Box<dyn Error>> {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = DebugGamepad::new();

    let raw = RawFrame {
        axes: vec![1.0, 0.9, -1.0, -1.0, 1.0, 0.0],
        buttons: vec![],
        hat: Hat::CENTER,
    };
    let frame = translator.translate(&raw, &mut sink)?;
    assert_eq!(frame.left_stick.1, -0.9, "Y axes should be inverted");
    assert_eq!(frame.right_trigger, 0.5);

    let state = sink.committed();
    assert_eq!(state.left_stick, (32766, -29490));
    assert_eq!(state.right_stick, (-32767, 32766));
    assert_eq!(state.left_trigger, 255);
    assert_eq!(state.right_trigger, 127);

    Ok(())
}

#[test]
fn test_missing_axes() -> Result<(), Box<dyn Error>> {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = DebugGamepad::new();

    let raw = RawFrame {
        axes: vec![0.5, 0.6],
        buttons: vec![],
        hat: Hat::CENTER,
    };
    let frame = translator.translate(&raw, &mut sink)?;
    assert_eq!(frame.right_stick, (0.0, 0.0));
    assert_eq!(frame.left_trigger, 0.0);
    assert_eq!(frame.right_trigger, 0.0);

    Ok(())
}

#[test]
fn test_closed_sink() {
    let mut translator = FrameTranslator::from_config(&DriftConfig::default());
    let mut sink = DebugGamepad::new();
    let _ = sink.close();

    let result = translator.translate(&rest_frame(), &mut sink);
    assert_eq!(result, Err(OutputError::Closed));
}

#[test]
fn test_scaling() {
    assert_eq!(scale_stick(1.5, 100), 100, "Stick values should be clamped");
    assert_eq!(scale_stick(-0.999, 10), -9, "Stick values truncate toward zero");
    assert_eq!(scale_stick(0.0, i16::MAX), 0);
    assert_eq!(scale_stick(-1.0, i16::MAX), -i16::MAX);
    assert_eq!(scale_trigger(1.0), 255);
    assert_eq!(scale_trigger(0.999), 254);
    assert_eq!(scale_trigger(-0.5), 0);
    assert_eq!(trigger_value(-1.0), 0.0);
    assert_eq!(trigger_value(0.0), 0.5);
    assert_eq!(trigger_value(3.0), 1.0);
    assert_eq!(trigger_value(f64::NAN), 0.0);
}
