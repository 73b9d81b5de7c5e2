use super::*;

#[test]
fn empty_tracker_reports_zero() {
    assert_eq!(VelocityTracker1D::new().calculate_velocity(), 0.0);
}

#[test]
fn single_point_reports_zero() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn constant_motion_is_measured_in_units_per_second() {
    let mut tracker = VelocityTracker1D::new();
    // 100 points every 10ms.
    for step in 0..4 {
        tracker.add_data_point(step * 10, step as f32 * 100.0);
    }

    let velocity = tracker.calculate_velocity();
    assert!(
        (velocity - 10_000.0).abs() < 1_000.0,
        "expected ~10000, got {velocity}"
    );
}

#[test]
fn decreasing_positions_report_negative_velocity() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 300.0);
    tracker.add_data_point(10, 200.0);
    tracker.add_data_point(20, 100.0);

    assert!(tracker.calculate_velocity() < 0.0);
}

#[test]
fn velocity_is_capped_both_ways() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(1, 10_000.0);
    assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

    tracker.reset();
    tracker.add_data_point(0, 10_000.0);
    tracker.add_data_point(1, 0.0);
    assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
}

#[test]
fn samples_outside_horizon_are_ignored() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(150, 100.0);
    tracker.add_data_point(160, 200.0);
    tracker.add_data_point(170, 300.0);

    assert!(tracker.calculate_velocity() > 0.0);
}

#[test]
fn long_pause_before_release_reports_zero() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);

    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn motion_before_a_pause_does_not_count() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(10, 500.0);
    tracker.add_data_point(20, 1_000.0);
    // Resumes slowly after a pause longer than ASSUME_STOPPED_MS.
    tracker.add_data_point(65, 1_000.0);
    tracker.add_data_point(75, 1_010.0);
    tracker.add_data_point(85, 1_020.0);

    let velocity = tracker.calculate_velocity();
    assert!(
        (velocity - 1_000.0).abs() < 100.0,
        "expected ~1000, got {velocity}"
    );
}
