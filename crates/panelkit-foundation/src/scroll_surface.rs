//! Contract between a scrollable content surface and its observer.
//!
//! A surface exposes exactly one delegate slot, like most platform scroll
//! views. Offsets are the content's vertical translation in screen space:
//! `0.0` is the rest position at the start of the content, negative values
//! scroll toward the end (finger moving up) and positive values are
//! overscroll past the start (finger pulling down). Velocities use the same
//! axis, in points per millisecond.

use std::rc::Rc;

/// A scrollable surface hosted inside a panel.
pub trait ScrollSurface {
    /// Current content offset.
    fn content_offset(&self) -> f32;

    /// Moves the content. Implementations notify their delegate through
    /// [`ScrollDelegate::did_scroll`], exactly as a user scroll would.
    fn set_content_offset(&self, offset: f32);

    fn delegate(&self) -> Option<Rc<dyn ScrollDelegate>>;

    fn set_delegate(&self, delegate: Option<Rc<dyn ScrollDelegate>>);
}

/// Callbacks a [`ScrollSurface`] delivers to its delegate.
///
/// All methods default to no-ops so listeners implement only what they need.
pub trait ScrollDelegate {
    fn will_begin_dragging(&self, _surface: &dyn ScrollSurface) {}

    fn did_scroll(&self, _surface: &dyn ScrollSurface) {}

    /// The finger lifted with `velocity`. `target_offset` is where inertial
    /// scrolling would stop; a delegate may rewrite it.
    fn will_end_dragging(
        &self,
        _surface: &dyn ScrollSurface,
        _velocity: f32,
        _target_offset: &mut f32,
    ) {
    }

    fn did_end_dragging(&self, _surface: &dyn ScrollSurface, _will_decelerate: bool) {}
}
