use std::io;

use evdev::AbsoluteAxisCode;

use super::{
    evdev::{
        normalize_signed_value, normalize_trigger_value, read_error, supported_prefix_len,
        supported_span_len, AXIS_LAYOUT,
    },
    InputError,
};

#[test]
fn test_normalize_signed_value() {
    assert_eq!(normalize_signed_value(32767, -32768, 32767), 1.0);
    assert_eq!(normalize_signed_value(-32768, -32768, 32767), -1.0);
    assert_eq!(normalize_signed_value(0, -32768, 32767), 0.0);
    assert_eq!(
        normalize_signed_value(128, 0, 255),
        1.0 / 128.0,
        "unsigned ranges should be centered on their midpoint"
    );
    assert_eq!(normalize_signed_value(0, 0, 255), -1.0);
    assert_eq!(
        normalize_signed_value(5, 0, 0),
        0.0,
        "empty ranges should normalize to zero"
    );
}

#[test]
fn test_normalize_trigger_value() {
    assert_eq!(normalize_trigger_value(0, 0, 255), -1.0, "released trigger");
    assert_eq!(normalize_trigger_value(255, 0, 255), 1.0, "pressed trigger");
    assert_eq!(normalize_trigger_value(1023, 0, 1023), 1.0);
    assert_eq!(normalize_trigger_value(2000, 0, 1023), 1.0, "should clamp");
}

#[test]
fn test_supported_layout() {
    let supported = [true, true, false, true];
    assert_eq!(supported_prefix_len(&supported, |s| *s), 2);
    assert_eq!(supported_span_len(&supported, |s| *s), 4);
    assert_eq!(supported_span_len(&[false, false], |s| *s), 0);

    // A stick-only device has no triggers
    let count = supported_prefix_len(&AXIS_LAYOUT, |(code, _)| {
        *code != AbsoluteAxisCode::ABS_Z && *code != AbsoluteAxisCode::ABS_RZ
    });
    assert_eq!(count, 4);
}

#[test]
fn test_read_error() {
    let err = io::Error::from_raw_os_error(nix::errno::Errno::ENODEV as i32);
    assert!(matches!(read_error(err), InputError::Disconnected(_)));

    let err = io::Error::from_raw_os_error(nix::errno::Errno::EIO as i32);
    assert!(matches!(read_error(err), InputError::ReadFailure(_)));
}
