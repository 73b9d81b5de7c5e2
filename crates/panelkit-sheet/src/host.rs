//! Seams between the panel and the application hosting it.

use std::rc::Rc;

use panelkit_foundation::ScrollSurface;

/// Independently animated dimension the host renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Content container height in points.
    Height,
    /// Downward translation of the whole panel in points.
    CloseTranslation,
    CornerRadius,
    HandleOpacity,
    DimmingOpacity,
}

/// Renders the values the panel computes.
///
/// Called synchronously from gesture input and from frame callbacks, always
/// on the UI thread.
pub trait PresentationHost {
    fn apply(&self, axis: Axis, value: f32);
}

/// What the panel shows.
pub trait PanelContent {
    /// Scrollable surface whose drags the panel may take over.
    fn scroll_surface(&self) -> Option<Rc<dyn ScrollSurface>> {
        None
    }
}
