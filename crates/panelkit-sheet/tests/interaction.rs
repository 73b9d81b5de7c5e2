use std::cell::RefCell;
use std::rc::Rc;

use panelkit_foundation::PanEvent;
use panelkit_sheet::{Axis, DragMode, PanelConfig, PanelPosition, PanelStyle};
use panelkit_testing::{FakeContent, PanelHarness};

fn harness() -> PanelHarness {
    PanelHarness::new(PanelConfig::default()).expect("valid harness")
}

/// Small deterministic generator for movement sequences.
struct Lcg(u64);

impl Lcg {
    fn next_movement(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let unit = (self.0 >> 40) as f32 / (1u64 << 24) as f32;
        (unit - 0.5) * 900.0
    }
}

#[test]
fn axes_stay_clamped_under_arbitrary_drags() {
    let harness = harness();
    let mut rng = Lcg(7);

    for _ in 0..40 {
        harness.panel().on_pan(PanEvent::Began);
        for _ in 0..25 {
            let movement = rng.next_movement();
            harness
                .panel()
                .on_pan(PanEvent::Changed { movement });
            let height = harness.panel().height_progress();
            let close = harness.panel().close_progress();
            assert!((0.0..=1.0).contains(&height), "height {height}");
            assert!((0.0..=1.0).contains(&close), "close {close}");
        }
        harness
            .panel()
            .on_pan(PanEvent::Ended { velocity: 0.0 });
    }

    for value in harness.host().values(Axis::Height) {
        assert!((380.0..=780.0).contains(&value), "height value {value}");
    }
    for value in harness.host().values(Axis::CloseTranslation) {
        assert!(value >= 0.0, "close translation {value}");
    }
}

#[test]
fn closing_session_never_touches_height() {
    let harness = harness();
    let panel = harness.panel();

    panel.on_pan(PanEvent::Began);
    panel.on_pan(PanEvent::Changed { movement: -60.0 });
    assert_eq!(panel.drag_mode(), Some(DragMode::Closing));
    let heights = harness.host().count(Axis::Height);

    for movement in [120.0, 300.0, -20.0, 500.0] {
        panel.on_pan(PanEvent::Changed { movement });
        assert_eq!(panel.drag_mode(), Some(DragMode::Closing));
    }

    assert_eq!(harness.host().count(Axis::Height), heights);
    assert_eq!(panel.height_progress(), 0.0);
}

#[test]
fn slow_release_past_half_expands() {
    let mut harness = harness();
    harness.pan(&[240.0], 0.3);
    harness.pump_until_idle();
    assert_eq!(
        harness.panel().current_panel_position(),
        PanelPosition::Expanded
    );
}

#[test]
fn fling_from_collapsed_expands_early() {
    let mut harness = harness();
    harness.pan(&[120.0], 1.2);
    harness.pump_until_idle();
    assert_eq!(
        harness.panel().current_panel_position(),
        PanelPosition::Expanded
    );
}

#[test]
fn fling_down_from_expanded_collapses() {
    let mut harness = harness();
    harness.pan(&[400.0], 0.0);
    harness.pump_until_idle();

    harness.pan(&[-80.0], -1.6);
    harness.pump_until_idle();

    assert_eq!(
        harness.panel().current_panel_position(),
        PanelPosition::Collapsed
    );
}

#[test]
fn snap_follows_ease_in_out_curve() {
    let mut harness = harness();
    harness.pan(&[220.0], 0.0);
    harness.host().clear();

    harness.pump_until_idle();
    let heights = harness.host().values(Axis::Height);

    assert!(heights.windows(2).all(|pair| pair[1] >= pair[0]));
    assert_eq!(heights.last().copied(), Some(780.0));
    let steps: Vec<f32> = heights.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let middle = steps[steps.len() / 2];
    assert!(middle > steps[1], "snap accelerates from rest");
    assert!(middle > steps[steps.len() - 1], "snap decelerates into target");
}

#[test]
fn snap_takes_standard_duration() {
    let mut harness = harness();
    harness.pan(&[300.0], 0.0);

    harness.advance_millis(PanelStyle::ANIMATION_DURATION_MILLIS / 2);
    let midway = harness.panel().height_progress();
    assert!(midway > 0.75 && midway < 1.0);

    harness.advance_millis(PanelStyle::ANIMATION_DURATION_MILLIS);
    assert_eq!(harness.panel().height_progress(), 1.0);
    assert!(!harness.panel().is_animating());
}

#[test]
fn pointer_drag_up_recognizes_pan_and_expands() {
    let mut harness = harness();
    let ys: Vec<f32> = (0..12).map(|step| 700.0 - step as f32 * 25.0).collect();

    harness.pointer_drag(&ys, 10);
    harness.pump_until_idle();

    assert_eq!(
        harness.panel().current_panel_position(),
        PanelPosition::Expanded
    );
}

#[test]
fn pointer_jitter_below_slop_is_ignored() {
    let mut harness = harness();
    harness.host().clear();

    harness.pointer_drag(&[500.0, 503.0, 497.0, 501.0], 16);
    harness.pump_until_idle();

    assert!(harness.host().is_empty());
}

#[test]
fn pointer_drag_down_dismisses() {
    let mut harness = harness();
    let closed = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&closed);
    harness
        .panel()
        .set_on_closed_with_gesture(move || *sink.borrow_mut() += 1);

    let ys: Vec<f32> = (0..15).map(|step| 420.0 + step as f32 * 20.0).collect();
    harness.pointer_drag(&ys, 10);
    harness.pump_until_idle();

    assert_eq!(harness.panel().close_progress(), 1.0);
    assert_eq!(*closed.borrow(), 1);
}

#[test]
fn show_and_hide_report_completion_once() {
    let mut harness = harness();
    let log = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    harness.panel().show(
        true,
        Some(Box::new(move |finished| sink.borrow_mut().push(("show", finished)))),
    );
    harness.pump_until_idle();
    let sink = Rc::clone(&log);
    harness.panel().hide(
        true,
        Some(Box::new(move |finished| sink.borrow_mut().push(("hide", finished)))),
    );
    harness.pump_until_idle();

    assert_eq!(
        log.borrow().as_slice(),
        &[("show", true), ("hide", true)]
    );
    assert_eq!(harness.host().last(Axis::CloseTranslation), Some(400.0));
}

#[test]
fn immediate_hide_applies_synchronously() {
    let harness = harness();
    harness.panel().hide(false, None);
    assert_eq!(harness.panel().close_progress(), 1.0);
    assert!(!harness.runtime().handle().has_frame_callbacks());
}

#[test]
fn dimming_while_collapsed_fades_with_dismissal() {
    let harness = PanelHarness::new(
        PanelConfig::default().with_background_dimming_on_collapsed_state(true),
    )
    .expect("valid harness");
    assert_eq!(harness.host().last(Axis::DimmingOpacity), Some(1.0));

    harness.panel().on_pan(PanEvent::Began);
    harness
        .panel()
        .on_pan(PanEvent::Changed { movement: -100.0 });

    assert_eq!(harness.host().last(Axis::DimmingOpacity), Some(0.75));
}

#[test]
fn replace_runs_exactly_one_transition() {
    let mut harness = harness();
    harness.pan(&[400.0], 0.0);
    harness.pump_until_idle();

    let positions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&positions);
    harness
        .panel()
        .set_on_position_changed(move |position| sink.borrow_mut().push(position));
    harness.host().clear();

    harness
        .replace(
            FakeContent::fixed(),
            PanelConfig::default().with_collapsed_height(500.0),
        )
        .expect("valid config");
    assert_eq!(
        harness.panel().current_panel_position(),
        PanelPosition::Collapsed
    );
    assert_eq!(positions.borrow().as_slice(), &[PanelPosition::Collapsed]);

    harness.pump_until_idle();
    let heights = harness.host().values(Axis::Height);
    assert!(heights.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(heights.first().copied().map(|h| h <= 780.0), Some(true));
    assert_eq!(heights.last().copied(), Some(480.0));
    assert!(!harness.panel().is_transitioning());
}

#[test]
fn gesture_cancels_content_transition() {
    let mut harness = harness();
    harness
        .replace(
            FakeContent::fixed(),
            PanelConfig::default().with_collapsed_height(200.0),
        )
        .expect("valid config");
    harness.advance_frame();
    harness.advance_frame();
    assert!(harness.panel().is_transitioning());

    harness.panel().on_pan(PanEvent::Began);

    assert!(!harness.panel().is_transitioning());
    assert!(!harness.runtime().handle().has_frame_callbacks());
}

#[test]
fn close_span_follows_expanded_height() {
    let mut harness = harness();
    harness.pan(&[400.0], 0.0);
    harness.pump_until_idle();

    harness.panel().hide(true, None);
    harness.pump_until_idle();

    assert_eq!(harness.host().last(Axis::CloseTranslation), Some(800.0));
}
