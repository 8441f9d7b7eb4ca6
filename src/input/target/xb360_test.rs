use std::error::Error;

use evdev::{AbsoluteAxisCode, EventType, InputEvent, KeyCode};

use crate::input::capability::GamepadButton;

use super::{
    debug::DebugGamepad,
    xb360::{abs_values, button_code, state_events},
    GamepadState, OutputError, OutputSink,
};

fn abs_event(events: &[InputEvent], axis: AbsoluteAxisCode) -> Option<i32> {
    events
        .iter()
        .find(|e| e.event_type() == EventType::ABSOLUTE && e.code() == axis.0)
        .map(|e| e.value())
}

#[test]
fn test_initial_state_events() {
    let events = state_events(None, &GamepadState::default());
    let keys = events
        .iter()
        .filter(|e| e.event_type() == EventType::KEY)
        .count();
    let axes = events
        .iter()
        .filter(|e| e.event_type() == EventType::ABSOLUTE)
        .count();
    assert_eq!(keys, 10, "should emit every non-dpad button");
    assert_eq!(axes, 8, "should emit every axis");
}

#[test]
fn test_changed_state_events() {
    let previous = GamepadState::default();
    let mut next = previous.clone();
    next.set_button(GamepadButton::South, true);

    let events = state_events(Some(&previous), &next);
    assert_eq!(events.len(), 1, "should only emit changed values");
    assert_eq!(events[0].event_type(), EventType::KEY);
    assert_eq!(events[0].code(), KeyCode::BTN_SOUTH.0);
    assert_eq!(events[0].value(), 1);

    let events = state_events(Some(&next), &next);
    assert!(events.is_empty(), "unchanged state should emit nothing");
}

#[test]
fn test_diagonal_hat() {
    let mut state = GamepadState::default();
    state.set_button(GamepadButton::DPadUp, true);
    state.set_button(GamepadButton::DPadRight, true);

    let events = state_events(Some(&GamepadState::default()), &state);
    assert_eq!(events.len(), 2, "a diagonal moves both hat axes");
    assert_eq!(abs_event(&events, AbsoluteAxisCode::ABS_HAT0X), Some(1));
    assert_eq!(
        abs_event(&events, AbsoluteAxisCode::ABS_HAT0Y),
        Some(-1),
        "up is negative on evdev hats"
    );
}

#[test]
fn test_stick_y_is_flipped() {
    let state = GamepadState {
        left_stick: (100, 32767),
        right_stick: (-32767, i16::MIN),
        left_trigger: 255,
        ..Default::default()
    };

    let values = abs_values(&state);
    assert_eq!(values[0], (AbsoluteAxisCode::ABS_X, 100));
    assert_eq!(values[1], (AbsoluteAxisCode::ABS_Y, -32767));
    assert_eq!(values[2], (AbsoluteAxisCode::ABS_RX, -32767));
    assert_eq!(
        values[3],
        (AbsoluteAxisCode::ABS_RY, 32767),
        "flipped value should stay in range"
    );
    assert_eq!(values[4], (AbsoluteAxisCode::ABS_Z, 255));
}

#[test]
fn test_button_codes() {
    assert_eq!(button_code(GamepadButton::South), Some(KeyCode::BTN_SOUTH));
    assert_eq!(button_code(GamepadButton::RightStick), Some(KeyCode::BTN_THUMBR));
    for button in GamepadButton::ALL {
        assert_eq!(
            button_code(button).is_none(),
            button.is_dpad(),
            "only dpad buttons should lack a key code: {button:?}"
        );
    }
}

#[test]
fn test_debug_gamepad_lifecycle() -> Result<(), Box<dyn Error>> {
    let mut sink = DebugGamepad::new();
    sink.left_stick(10, -10)?;
    sink.press(GamepadButton::Start)?;
    assert!(
        !sink.committed().is_pressed(GamepadButton::Start),
        "state should be pending until commit"
    );

    sink.commit()?;
    assert_eq!(sink.committed().left_stick, (10, -10));
    assert!(sink.committed().is_pressed(GamepadButton::Start));

    sink.reset()?;
    assert_eq!(*sink.committed(), GamepadState::default());

    sink.close()?;
    sink.close()?;
    sink.reset()?;
    assert!(sink.is_closed());
    assert_eq!(sink.reset_count(), 1, "reset after close should do nothing");
    assert_eq!(sink.press(GamepadButton::South), Err(OutputError::Closed));
    assert_eq!(sink.commit(), Err(OutputError::Closed));

    Ok(())
}
