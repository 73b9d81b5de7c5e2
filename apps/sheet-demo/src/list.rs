//! A list the demo hosts inside the panel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use panelkit_foundation::{ScrollDelegate, ScrollSurface};
use panelkit_sheet::PanelContent;

/// Scrollable list with a fixed content length.
///
/// Offsets are the list's translation: 0 shows the first row, negative
/// values scroll toward the end.
pub struct DemoList {
    rows: usize,
    row_height: f32,
    offset: Cell<f32>,
    delegate: RefCell<Option<Rc<dyn ScrollDelegate>>>,
}

impl DemoList {
    pub fn new(rows: usize, row_height: f32) -> Rc<Self> {
        Rc::new(Self {
            rows,
            row_height,
            offset: Cell::new(0.0),
            delegate: RefCell::new(None),
        })
    }

    /// First visible row.
    pub fn first_visible_row(&self) -> usize {
        let scrolled = (-self.offset.get()).max(0.0);
        ((scrolled / self.row_height) as usize).min(self.rows.saturating_sub(1))
    }

    /// Finger drag through list offsets, released with `velocity`.
    pub fn drag(&self, offsets: &[f32], velocity: f32) {
        self.notify(|delegate| delegate.will_begin_dragging(self));
        for &offset in offsets {
            self.set_content_offset(offset);
        }
        let current = self.offset.get();
        let mut target = current + velocity * 250.0;
        self.notify(|delegate| delegate.will_end_dragging(self, velocity, &mut target));
        self.notify(|delegate| delegate.did_end_dragging(self, target != current));
        // No inertia above the first row: overscroll springs back to rest.
        let settled = target.min(0.0);
        if settled != current {
            self.set_content_offset(settled);
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn ScrollDelegate)) {
        let delegate = self.delegate.borrow().clone();
        if let Some(delegate) = delegate {
            f(delegate.as_ref());
        }
    }
}

impl ScrollSurface for DemoList {
    fn content_offset(&self) -> f32 {
        self.offset.get()
    }

    fn set_content_offset(&self, offset: f32) {
        self.offset.set(offset);
        self.notify(|delegate| delegate.did_scroll(self));
    }

    fn delegate(&self) -> Option<Rc<dyn ScrollDelegate>> {
        self.delegate.borrow().clone()
    }

    fn set_delegate(&self, delegate: Option<Rc<dyn ScrollDelegate>>) {
        *self.delegate.borrow_mut() = delegate;
    }
}

/// Panel content: either a list or a static card.
pub enum DemoContent {
    List(Rc<DemoList>),
    Card,
}

impl PanelContent for DemoContent {
    fn scroll_surface(&self) -> Option<Rc<dyn ScrollSurface>> {
        match self {
            DemoContent::List(list) => Some(Rc::clone(list) as Rc<dyn ScrollSurface>),
            DemoContent::Card => None,
        }
    }
}
