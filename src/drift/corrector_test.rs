use std::error::Error;

use crate::config::DriftConfig;

use super::{
    corrector::{AxisCorrector, BypassBand},
    StickAxis,
};

const EPSILON: f64 = 1e-9;

fn corrector() -> AxisCorrector {
    AxisCorrector::from_config(&DriftConfig::default())
}

#[test]
fn test_general_axes() -> Result<(), Box<dyn Error>> {
    let mut corrector = corrector();
    let axes = [StickAxis::LeftX, StickAxis::RightX, StickAxis::RightY];
    let samples = [-1.0, -0.6, -0.05, -0.04999, 0.0, 0.02, 0.0499, 0.05002, 0.3, 1.0];

    for axis in axes {
        let bias = corrector.model().bias(axis);
        let deadzone = corrector.model().deadzone(axis);
        for raw in samples {
            let expected = if (raw - bias).abs() >= deadzone {
                (raw - bias).clamp(-1.0, 1.0)
            } else {
                0.0
            };
            let corrected = corrector.correct(axis, raw);
            assert!(
                (corrected - expected).abs() < EPSILON,
                "{axis:?} raw {raw}: expected {expected}, got {corrected}"
            );
        }
    }

    Ok(())
}

#[test]
fn test_general_axes_clamp() {
    let config = DriftConfig {
        bias: [-0.5, 0.0, 0.5, 0.0],
        ..Default::default()
    };
    let mut corrector = AxisCorrector::from_config(&config);
    assert_eq!(corrector.correct(StickAxis::LeftX, 0.9), 1.0);
    assert_eq!(corrector.correct(StickAxis::RightX, -0.9), -1.0);
}

#[test]
fn test_bypass_axis() {
    let mut corrector = corrector();

    assert_eq!(
        corrector.correct(StickAxis::LeftY, 0.9),
        0.9,
        "values above the bypass band should pass through"
    );
    assert_eq!(
        corrector.correct(StickAxis::LeftY, -0.3),
        -0.3,
        "values below the bypass band should pass through"
    );

    let corrected = corrector.correct(StickAxis::LeftY, 0.2);
    assert!(
        (corrected - (0.2 - 0.51562)).abs() < EPSILON,
        "values inside the band should be corrected: {corrected}"
    );
}

#[test]
fn test_bypass_axis_at_rest() {
    let mut corrector = corrector();
    for _ in 0..20 {
        assert_eq!(
            corrector.correct(StickAxis::LeftY, 0.51562),
            0.0,
            "resting axis should read zero"
        );
    }
    assert_eq!(corrector.correct(StickAxis::LeftY, 0.53), 0.0, "inside deadzone");
}

#[test]
fn test_bypass_axis_motion_skips_deadzone() {
    let config = DriftConfig {
        motion_threshold: 0.02,
        ..Default::default()
    };
    let mut corrector = AxisCorrector::from_config(&config);

    // Rapid movement inside the deadzone band is treated as intentional
    assert_eq!(corrector.correct(StickAxis::LeftY, 0.48), 0.0);
    assert_eq!(corrector.correct(StickAxis::LeftY, 0.54), 0.0);
    let last = corrector
        .correct(StickAxis::LeftY, 0.48)
        .max(corrector.correct(StickAxis::LeftY, 0.54));
    assert!(
        (last - (0.54 - 0.51562)).abs() < EPSILON,
        "deadzone should not apply during motion: {last}"
    );
}

#[test]
fn test_bypass_band_requires_both_bounds() {
    let band = BypassBand::default();
    assert!(band.bypasses(0.6, 0.5));
    assert!(
        !band.bypasses(0.6, 0.7),
        "positive bypass also requires exceeding the bias"
    );
    assert!(band.bypasses(-0.2, 0.5));
    assert!(!band.bypasses(-0.1, 0.5), "lower bound is exclusive");
    assert!(!band.bypasses(0.55, 0.5), "upper bound is exclusive");
}

#[test]
fn test_idempotent_after_stable_history() {
    let mut corrector = corrector();
    for axis in StickAxis::ALL {
        for raw in [-0.8, 0.0, 0.03, 0.5, 0.52, 0.9] {
            let first = (0..10).map(|_| corrector.correct(axis, raw)).last();
            for _ in 0..5 {
                assert_eq!(
                    Some(corrector.correct(axis, raw)),
                    first,
                    "{axis:?} raw {raw} should be stable"
                );
            }
        }
    }
}

#[test]
fn test_output_is_clamped() {
    let mut corrector = corrector();
    for axis in StickAxis::ALL {
        let mut raw = -1.5;
        while raw <= 1.5 {
            let value = corrector.correct(axis, raw);
            assert!((-1.0..=1.0).contains(&value), "{axis:?} raw {raw} -> {value}");
            raw += 0.01;
        }
        assert_eq!(corrector.correct(axis, f64::NAN), 0.0);
    }
}
