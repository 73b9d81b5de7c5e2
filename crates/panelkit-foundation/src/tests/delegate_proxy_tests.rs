use super::*;

use std::cell::{Cell, RefCell};

struct NullSurface;

impl ScrollSurface for NullSurface {
    fn content_offset(&self) -> f32 {
        0.0
    }

    fn set_content_offset(&self, _offset: f32) {}

    fn delegate(&self) -> Option<Rc<dyn ScrollDelegate>> {
        None
    }

    fn set_delegate(&self, _delegate: Option<Rc<dyn ScrollDelegate>>) {}
}

/// Logs every callback under `name` into a shared journal.
struct Journaling {
    name: &'static str,
    journal: Rc<RefCell<Vec<String>>>,
    rewrite_target_to: Option<f32>,
    seen_target: Cell<Option<f32>>,
}

impl Journaling {
    fn new(
        name: &'static str,
        journal: &Rc<RefCell<Vec<String>>>,
        rewrite_target_to: Option<f32>,
    ) -> Rc<Self> {
        Rc::new(Self {
            name,
            journal: Rc::clone(journal),
            rewrite_target_to,
            seen_target: Cell::new(None),
        })
    }

    fn log(&self, event: &str) {
        self.journal.borrow_mut().push(format!("{}:{event}", self.name));
    }
}

impl ScrollDelegate for Journaling {
    fn will_begin_dragging(&self, _surface: &dyn ScrollSurface) {
        self.log("begin");
    }

    fn did_scroll(&self, _surface: &dyn ScrollSurface) {
        self.log("scroll");
    }

    fn will_end_dragging(
        &self,
        _surface: &dyn ScrollSurface,
        _velocity: f32,
        target_offset: &mut f32,
    ) {
        self.log("will_end");
        self.seen_target.set(Some(*target_offset));
        if let Some(target) = self.rewrite_target_to {
            *target_offset = target;
        }
    }

    fn did_end_dragging(&self, _surface: &dyn ScrollSurface, _will_decelerate: bool) {
        self.log("did_end");
    }
}

#[test]
fn every_callback_reaches_every_listener() {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let proxy = ScrollDelegateProxy::new(Journaling::new("a", &journal, None))
        .with_secondary(Journaling::new("b", &journal, None))
        .with_secondary(Journaling::new("c", &journal, None));
    assert_eq!(proxy.listener_count(), 3);

    let mut target = 0.0;
    proxy.will_begin_dragging(&NullSurface);
    proxy.did_scroll(&NullSurface);
    proxy.will_end_dragging(&NullSurface, 1.0, &mut target);
    proxy.did_end_dragging(&NullSurface, false);

    let journal = journal.borrow();
    for event in ["begin", "scroll", "will_end", "did_end"] {
        for name in ["a", "b", "c"] {
            let entry = format!("{name}:{event}");
            assert_eq!(
                journal.iter().filter(|logged| **logged == entry).count(),
                1,
                "{entry} delivered exactly once"
            );
        }
    }
}

#[test]
fn primary_target_decision_wins_in_any_order() {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let primary = Journaling::new("primary", &journal, Some(5.0));
    let secondary = Journaling::new("secondary", &journal, Some(-80.0));

    let proxy = ScrollDelegateProxy::new(primary.clone()).with_secondary(secondary.clone());
    let mut target = -200.0;
    proxy.will_end_dragging(&NullSurface, 2.0, &mut target);

    assert_eq!(target, 5.0);
    assert_eq!(primary.seen_target.get(), Some(-200.0));
    assert_eq!(
        secondary.seen_target.get(),
        Some(-200.0),
        "secondary sees the surface's proposal, not the primary's rewrite"
    );
}

#[test]
fn secondary_target_applies_when_primary_keeps_proposal() {
    let journal = Rc::new(RefCell::new(Vec::new()));
    let proxy = ScrollDelegateProxy::new(Journaling::new("primary", &journal, None))
        .with_secondary(Journaling::new("secondary", &journal, Some(-80.0)));

    let mut target = -200.0;
    proxy.will_end_dragging(&NullSurface, 2.0, &mut target);

    assert_eq!(target, -80.0);
}
