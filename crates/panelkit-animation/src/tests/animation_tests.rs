use super::*;

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    for easing in [Easing::Linear, Easing::EaseInOut] {
        assert!(
            easing.transform(0.0).abs() < 0.01,
            "start should be ~0 for {:?}",
            easing
        );
        assert!(
            (easing.transform(1.0) - 1.0).abs() < 0.01,
            "end should be ~1 for {:?}",
            easing
        );
    }
}

#[test]
fn easing_clamps_out_of_range_input() {
    assert_eq!(Easing::EaseInOut.transform(-1.0), 0.0);
    assert_eq!(Easing::EaseInOut.transform(2.0), 1.0);
    assert_eq!(Easing::Linear.transform(f32::NAN), 0.0);
}

#[test]
fn ease_in_out_is_symmetric_and_monotonic() {
    let mid = Easing::EaseInOut.transform(0.5);
    assert!((mid - 0.5).abs() < 0.01);
    assert!(Easing::EaseInOut.transform(0.2) < 0.2);
    assert!(Easing::EaseInOut.transform(0.8) > 0.8);

    let mut previous = 0.0;
    for step in 1..=100 {
        let value = Easing::EaseInOut.transform(step as f32 / 100.0);
        assert!(value >= previous);
        previous = value;
    }
}

#[test]
fn animation_spec_default_is_standard_snap() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 250);
    assert_eq!(spec.easing, Easing::EaseInOut);
    assert!(!spec.is_immediate());
    assert!(AnimationSpec::immediate().is_immediate());
}
