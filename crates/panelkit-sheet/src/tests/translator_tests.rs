use super::*;

use std::cell::Cell;

struct FakeAxes {
    height: Cell<f32>,
    close: Cell<f32>,
    resize_span: f32,
    close_span: f32,
}

impl FakeAxes {
    fn new(height: f32, close: f32) -> Self {
        Self {
            height: Cell::new(height),
            close: Cell::new(close),
            resize_span: 400.0,
            close_span: 400.0,
        }
    }
}

impl DragAxes for FakeAxes {
    fn height_progress(&self) -> f32 {
        self.height.get()
    }

    fn close_progress(&self) -> f32 {
        self.close.get()
    }

    fn set_height_progress(&self, progress: f32) {
        self.height.set(progress);
    }

    fn set_close_progress(&self, progress: f32) {
        self.close.set(progress);
    }

    fn resize_span(&self) -> f32 {
        self.resize_span
    }

    fn close_span(&self) -> f32 {
        self.close_span
    }
}

fn translator() -> GestureTranslator {
    GestureTranslator::new(&PanelConfig::default())
}

#[test]
fn upward_movement_resizes() {
    let axes = FakeAxes::new(0.0, 0.0);
    let mut session = DragSession::new();

    let handoff = translator().translate(&mut session, &axes, 100.0);

    assert_eq!(handoff, Handoff::Consumed);
    assert_eq!(axes.height.get(), 0.25);
    assert_eq!(session.mode(), Some(DragMode::Resizing));
    assert_eq!(session.consumed(), 100.0);
}

#[test]
fn fully_expanded_declines_further_expansion() {
    let axes = FakeAxes::new(1.0, 0.0);
    let mut session = DragSession::new();

    assert_eq!(
        translator().translate(&mut session, &axes, 10.0),
        Handoff::Declined
    );
    assert_eq!(session.mode(), None);
    assert_eq!(session.consumed(), 0.0);
}

#[test]
fn downward_from_collapsed_closes() {
    let axes = FakeAxes::new(0.0, 0.0);
    let mut session = DragSession::new();

    let handoff = translator().translate(&mut session, &axes, -100.0);

    assert_eq!(handoff, Handoff::Consumed);
    assert_eq!(axes.close.get(), 0.25);
    assert_eq!(axes.height.get(), 0.0);
    assert!(session.is_closing());
}

#[test]
fn closing_session_never_resizes() {
    let axes = FakeAxes::new(0.0, 0.0);
    let mut session = DragSession::new();
    let translator = translator();

    translator.translate(&mut session, &axes, -40.0);
    for movement in [20.0, 30.0, 500.0, -10.0, 80.0] {
        translator.translate(&mut session, &axes, movement);
        assert_eq!(axes.height.get(), 0.0, "height moved during closing");
        assert_eq!(session.mode(), Some(DragMode::Closing));
    }
    assert_eq!(axes.close.get(), 0.0);
}

#[test]
fn resizing_switches_to_closing_at_the_bottom() {
    let axes = FakeAxes::new(0.0, 0.0);
    let mut session = DragSession::new();
    let translator = translator();

    translator.translate(&mut session, &axes, 40.0);
    assert_eq!(session.mode(), Some(DragMode::Resizing));
    translator.translate(&mut session, &axes, -100.0);
    assert_eq!(axes.height.get(), 0.0);
    assert_eq!(session.mode(), Some(DragMode::Resizing));

    translator.translate(&mut session, &axes, -40.0);
    assert_eq!(session.mode(), Some(DragMode::Closing));
    assert_eq!(axes.close.get(), 0.1);
}

#[test]
fn nonzero_close_progress_forces_closing() {
    let axes = FakeAxes::new(0.0, 0.5);
    let mut session = DragSession::new();

    translator().translate(&mut session, &axes, 100.0);

    assert_eq!(axes.close.get(), 0.25);
    assert_eq!(axes.height.get(), 0.0);
}

#[test]
fn closing_disabled_declines() {
    let axes = FakeAxes::new(0.0, 0.0);
    let mut session = DragSession::new();
    let translator = GestureTranslator::new(&PanelConfig::default().with_closing_by_gesture(false));

    assert_eq!(
        translator.translate(&mut session, &axes, -30.0),
        Handoff::Declined
    );
    assert_eq!(axes.close.get(), 0.0);
    assert_eq!(session.mode(), None);
}

#[test]
fn non_expandable_declines_resizing() {
    let axes = FakeAxes::new(0.0, 0.0);
    let mut session = DragSession::new();
    let translator = GestureTranslator::new(&PanelConfig::default().with_expandable(false));

    assert_eq!(
        translator.translate(&mut session, &axes, 30.0),
        Handoff::Declined
    );
    assert_eq!(
        translator.translate(&mut session, &axes, -30.0),
        Handoff::Consumed
    );
}

#[test]
fn zero_span_declines_without_dividing() {
    let mut axes = FakeAxes::new(0.0, 0.0);
    axes.resize_span = 0.0;
    axes.close_span = 0.0;
    let mut session = DragSession::new();
    let translator = translator();

    assert_eq!(translator.translate(&mut session, &axes, 10.0), Handoff::Declined);
    assert_eq!(translator.translate(&mut session, &axes, -10.0), Handoff::Declined);
    assert_eq!(axes.height.get(), 0.0);
    assert_eq!(axes.close.get(), 0.0);
}

#[test]
fn both_axes_stay_clamped() {
    let axes = FakeAxes::new(0.0, 0.0);
    let translator = translator();
    let movements = [
        350.0, 900.0, -120.0, -2000.0, 45.0, f32::NAN, -75.0, 3000.0, -1.0, 0.0, -650.0,
    ];

    for start_closing in [false, true] {
        let mut session = DragSession::new();
        if start_closing {
            translator.translate(&mut session, &axes, -1.0);
        }
        for movement in movements {
            translator.translate(&mut session, &axes, movement);
            let height = axes.height.get();
            let close = axes.close.get();
            assert!((0.0..=1.0).contains(&height), "height {height}");
            assert!((0.0..=1.0).contains(&close), "close {close}");
        }
    }
}
