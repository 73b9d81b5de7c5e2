//! Scroll handoff between hosted content and the panel around it.
//!
//! [`ScrollHandoff`] sits in a content surface's delegate slot (through a
//! [`ScrollDelegateProxy`], so an existing delegate keeps receiving every
//! callback) and watches each offset change. While the user drags and the
//! content is already past its rest position in the direction of travel, the
//! movement is offered to the panel. If the panel takes it, the surface is
//! rolled back to where it was, so the finger moves the panel instead of the
//! list and both read as one gesture.
//!
//! Movements and velocities handed to the [`ScrollerDelegate`] are in panel
//! space: positive is upward (expanding).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::delegate_proxy::ScrollDelegateProxy;
use crate::scroll_surface::{ScrollDelegate, ScrollSurface};

/// Outcome of offering a movement to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The panel applied the movement; the content must not move.
    Consumed,
    /// The panel declined; the content scrolls normally.
    Declined,
}

impl Handoff {
    pub fn is_consumed(self) -> bool {
        matches!(self, Handoff::Consumed)
    }
}

/// What the content should do with its own inertia after a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deceleration {
    Allow,
    /// Stop where the content is, e.g. while the panel is being dismissed.
    Suppress,
}

/// The panel side of the handoff.
pub trait ScrollerDelegate {
    fn scroller_will_begin_dragging(&self) {}

    /// Offers `movement` (points, upward positive) to the panel.
    fn scroller_did_scroll(&self, movement: f32) -> Handoff;

    /// The finger lifted while the content sat at its boundary.
    /// `velocity` is in points per millisecond, upward positive.
    fn scroller_will_end_dragging(&self, velocity: f32) -> Deceleration;

    fn scroller_did_end_dragging(&self) {}
}

/// Per-drag bookkeeping of who owns the content's scroll deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOwnership {
    /// The user's finger is on the content.
    pub is_dragging: bool,
    /// The panel consumed the most recent movement.
    pub is_consuming: bool,
    /// The panel consumed at least one movement during this drag.
    pub handed_off: bool,
    /// Offset the next movement is measured from.
    pub last_offset: f32,
}

struct HandoffInner {
    scroller: Weak<dyn ScrollerDelegate>,
    surface: RefCell<Option<Weak<dyn ScrollSurface>>>,
    installed: RefCell<Option<Rc<dyn ScrollDelegate>>>,
    previous_delegate: RefCell<Option<Rc<dyn ScrollDelegate>>>,
    ownership: Cell<ScrollOwnership>,
    is_damping: Cell<bool>,
}

/// Arbiter between a content surface and a panel.
///
/// Holds the surface and the panel weakly. Dropping the arbiter detaches it
/// and gives the surface its original delegate back.
pub struct ScrollHandoff {
    inner: Rc<HandoffInner>,
}

impl ScrollHandoff {
    pub fn new(scroller: Weak<dyn ScrollerDelegate>) -> Self {
        Self {
            inner: Rc::new(HandoffInner {
                scroller,
                surface: RefCell::new(None),
                installed: RefCell::new(None),
                previous_delegate: RefCell::new(None),
                ownership: Cell::new(ScrollOwnership::default()),
                is_damping: Cell::new(true),
            }),
        }
    }

    /// Whether handoff to the panel is currently permitted.
    pub fn is_damping(&self) -> bool {
        self.inner.is_damping.get()
    }

    pub fn set_damping(&self, damping: bool) {
        if self.inner.is_damping.replace(damping) != damping {
            log::debug!("scroll handoff damping -> {damping}");
        }
    }

    pub fn ownership(&self) -> ScrollOwnership {
        self.inner.ownership.get()
    }

    pub fn is_attached(&self) -> bool {
        self.inner
            .surface
            .borrow()
            .as_ref()
            .is_some_and(|surface| surface.strong_count() > 0)
    }

    /// Installs the arbiter on `surface`, keeping its current delegate as a
    /// secondary listener. Any previous attachment is detached first.
    pub fn attach(&self, surface: &Rc<dyn ScrollSurface>) {
        self.detach();

        let previous = surface.delegate();
        let primary: Rc<dyn ScrollDelegate> = self.inner.clone();
        let proxy = ScrollDelegateProxy::new(primary).with_secondaries(previous.clone());
        log::debug!(
            "attaching scroll handoff with {} listeners",
            proxy.listener_count()
        );
        let proxy: Rc<dyn ScrollDelegate> = Rc::new(proxy);

        *self.inner.previous_delegate.borrow_mut() = previous;
        *self.inner.installed.borrow_mut() = Some(Rc::clone(&proxy));
        *self.inner.surface.borrow_mut() = Some(Rc::downgrade(surface));
        self.inner.ownership.set(ScrollOwnership {
            last_offset: surface.content_offset(),
            ..ScrollOwnership::default()
        });

        surface.set_delegate(Some(proxy));
    }

    /// Removes the arbiter from its surface and restores the original
    /// delegate, unless someone else has replaced the proxy in the meantime.
    pub fn detach(&self) {
        let surface = self.inner.surface.borrow_mut().take();
        let installed = self.inner.installed.borrow_mut().take();
        let previous = self.inner.previous_delegate.borrow_mut().take();
        self.inner.ownership.set(ScrollOwnership::default());

        let (Some(surface), Some(installed)) = (surface.and_then(|s| s.upgrade()), installed)
        else {
            return;
        };
        let still_installed = surface
            .delegate()
            .is_some_and(|current| same_delegate(&current, &installed));
        if still_installed {
            surface.set_delegate(previous);
            log::debug!("scroll handoff detached");
        } else {
            log::debug!("scroll handoff detached; surface delegate was replaced externally");
        }
    }
}

impl Drop for ScrollHandoff {
    fn drop(&mut self) {
        self.detach();
    }
}

fn same_delegate(a: &Rc<dyn ScrollDelegate>, b: &Rc<dyn ScrollDelegate>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl HandoffInner {
    fn scroller(&self) -> Option<Rc<dyn ScrollerDelegate>> {
        self.scroller.upgrade()
    }
}

impl ScrollDelegate for HandoffInner {
    fn will_begin_dragging(&self, surface: &dyn ScrollSurface) {
        self.ownership.set(ScrollOwnership {
            is_dragging: true,
            is_consuming: false,
            handed_off: false,
            last_offset: surface.content_offset(),
        });
        if let Some(scroller) = self.scroller() {
            scroller.scroller_will_begin_dragging();
        }
    }

    fn did_scroll(&self, surface: &dyn ScrollSurface) {
        let offset = surface.content_offset();
        let mut ownership = self.ownership.get();
        let movement = offset - ownership.last_offset;
        if movement == 0.0 {
            return;
        }

        let past_boundary = (movement > 0.0 && offset > 0.0) || (movement < 0.0 && offset < 0.0);
        let eligible = ownership.is_dragging && past_boundary && self.is_damping.get();
        let handoff = match self.scroller() {
            Some(scroller) if eligible => scroller.scroller_did_scroll(-movement),
            _ => Handoff::Declined,
        };
        log::trace!("content moved {movement:.2} at offset {offset:.2}: {handoff:?}");

        match handoff {
            Handoff::Consumed => {
                ownership.is_consuming = true;
                ownership.handed_off = true;
                self.ownership.set(ownership);
                // Re-enters did_scroll with zero movement.
                surface.set_content_offset(ownership.last_offset);
            }
            Handoff::Declined => {
                ownership.is_consuming = false;
                ownership.last_offset = offset;
                self.ownership.set(ownership);
            }
        }
    }

    fn will_end_dragging(
        &self,
        surface: &dyn ScrollSurface,
        velocity: f32,
        target_offset: &mut f32,
    ) {
        let offset = surface.content_offset();
        // Away from the start the release belongs to the content, even if
        // earlier movement of this drag went to the panel.
        if offset < 0.0 {
            return;
        }
        let Some(scroller) = self.scroller() else {
            return;
        };
        if scroller.scroller_will_end_dragging(-velocity) == Deceleration::Suppress {
            log::debug!("suppressing content deceleration at offset {offset:.2}");
            *target_offset = offset;
        }
    }

    fn did_end_dragging(&self, _surface: &dyn ScrollSurface, _will_decelerate: bool) {
        let mut ownership = self.ownership.get();
        ownership.is_dragging = false;
        ownership.is_consuming = false;
        ownership.handed_off = false;
        self.ownership.set(ownership);
        if let Some(scroller) = self.scroller() {
            scroller.scroller_did_end_dragging();
        }
    }
}

#[cfg(test)]
#[path = "tests/scroll_handoff_tests.rs"]
mod tests;
