//! A scriptable stand-in for a platform scroll view.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use panelkit_foundation::{ScrollDelegate, ScrollSurface};
use panelkit_sheet::PanelContent;

/// Milliseconds of inertia a release is projected over.
const DECELERATION_MILLIS: f32 = 300.0;

/// In-memory scroll view with a single delegate slot.
///
/// Offsets follow the panel's scroll convention: 0 is the rest position,
/// negative values scroll toward the end, positive values are overscroll.
/// The drag helpers call the delegate in the same order a platform scroll
/// view does.
#[derive(Default)]
pub struct FakeScrollView {
    offset: Cell<f32>,
    delegate: RefCell<Option<Rc<dyn ScrollDelegate>>>,
    is_dragging: Cell<bool>,
    last_target: Cell<Option<f32>>,
}

impl FakeScrollView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging.get()
    }

    /// Target offset the last release settled on, after delegates had their
    /// say.
    pub fn last_target(&self) -> Option<f32> {
        self.last_target.get()
    }

    pub fn begin_drag(&self) {
        self.is_dragging.set(true);
        self.with_delegate(|delegate| delegate.will_begin_dragging(self));
    }

    /// Moves the content to `offset` as the finger would.
    pub fn drag_to(&self, offset: f32) {
        self.set_content_offset(offset);
    }

    /// Moves the content by `delta` from wherever it currently is.
    pub fn drag_by(&self, delta: f32) {
        self.set_content_offset(self.offset.get() + delta);
    }

    /// Lifts the finger with `velocity` (points per millisecond, same axis as
    /// the offset) and returns the target offset the view would decelerate
    /// to. The view jumps there right away unless the target equals the
    /// current offset.
    pub fn end_drag(&self, velocity: f32) -> f32 {
        let offset = self.offset.get();
        let mut target = offset + velocity * DECELERATION_MILLIS;
        self.with_delegate(|delegate| delegate.will_end_dragging(self, velocity, &mut target));
        let will_decelerate = target != offset;
        self.is_dragging.set(false);
        self.with_delegate(|delegate| delegate.did_end_dragging(self, will_decelerate));
        self.last_target.set(Some(target));
        if will_decelerate {
            self.set_content_offset(target);
        }
        target
    }

    /// Scripted drag through `offsets`, released with `velocity`.
    pub fn drag(&self, offsets: &[f32], velocity: f32) -> f32 {
        self.begin_drag();
        for &offset in offsets {
            self.drag_to(offset);
        }
        self.end_drag(velocity)
    }

    fn with_delegate(&self, f: impl FnOnce(&dyn ScrollDelegate)) {
        let delegate = self.delegate.borrow().clone();
        if let Some(delegate) = delegate {
            f(delegate.as_ref());
        }
    }
}

impl ScrollSurface for FakeScrollView {
    fn content_offset(&self) -> f32 {
        self.offset.get()
    }

    fn set_content_offset(&self, offset: f32) {
        self.offset.set(offset);
        self.with_delegate(|delegate| delegate.did_scroll(self));
    }

    fn delegate(&self) -> Option<Rc<dyn ScrollDelegate>> {
        self.delegate.borrow().clone()
    }

    fn set_delegate(&self, delegate: Option<Rc<dyn ScrollDelegate>>) {
        *self.delegate.borrow_mut() = delegate;
    }
}

/// Panel content optionally backed by a [`FakeScrollView`].
#[derive(Default)]
pub struct FakeContent {
    scroll_view: Option<Rc<FakeScrollView>>,
}

impl FakeContent {
    /// Content without a scrollable surface.
    pub fn fixed() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn scrolling(scroll_view: &Rc<FakeScrollView>) -> Rc<Self> {
        Rc::new(Self {
            scroll_view: Some(Rc::clone(scroll_view)),
        })
    }
}

impl PanelContent for FakeContent {
    fn scroll_surface(&self) -> Option<Rc<dyn ScrollSurface>> {
        self.scroll_view
            .as_ref()
            .map(|view| Rc::clone(view) as Rc<dyn ScrollSurface>)
    }
}
