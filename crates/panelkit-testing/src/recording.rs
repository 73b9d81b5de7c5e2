use std::cell::{Cell, RefCell};

use panelkit_foundation::{ScrollDelegate, ScrollSurface};
use panelkit_sheet::{Axis, PresentationHost};

/// Host that records every applied value in order.
#[derive(Default)]
pub struct RecordingHost {
    applied: RefCell<Vec<(Axis, f32)>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value applied to `axis`, oldest first.
    pub fn values(&self, axis: Axis) -> Vec<f32> {
        self.applied
            .borrow()
            .iter()
            .filter(|(applied, _)| *applied == axis)
            .map(|(_, value)| *value)
            .collect()
    }

    pub fn last(&self, axis: Axis) -> Option<f32> {
        self.applied
            .borrow()
            .iter()
            .rev()
            .find(|(applied, _)| *applied == axis)
            .map(|(_, value)| *value)
    }

    pub fn count(&self, axis: Axis) -> usize {
        self.applied
            .borrow()
            .iter()
            .filter(|(applied, _)| *applied == axis)
            .count()
    }

    pub fn len(&self) -> usize {
        self.applied.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.applied.borrow_mut().clear();
    }
}

impl PresentationHost for RecordingHost {
    fn apply(&self, axis: Axis, value: f32) {
        self.applied.borrow_mut().push((axis, value));
    }
}

/// Scroll delegate that counts callbacks and can rewrite the release target.
///
/// Stands in for whatever delegate an application installed on its list
/// before the panel attached.
#[derive(Default)]
pub struct RecordingDelegate {
    begins: Cell<usize>,
    scrolls: RefCell<Vec<f32>>,
    releases: RefCell<Vec<f32>>,
    ends: Cell<usize>,
    target_override: Cell<Option<f32>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites every proposed release target to `target`.
    pub fn with_target_override(self, target: f32) -> Self {
        self.target_override.set(Some(target));
        self
    }

    pub fn begins(&self) -> usize {
        self.begins.get()
    }

    /// Offsets observed on every scroll callback.
    pub fn scrolls(&self) -> Vec<f32> {
        self.scrolls.borrow().clone()
    }

    /// Release velocities observed.
    pub fn releases(&self) -> Vec<f32> {
        self.releases.borrow().clone()
    }

    pub fn ends(&self) -> usize {
        self.ends.get()
    }
}

impl ScrollDelegate for RecordingDelegate {
    fn will_begin_dragging(&self, _surface: &dyn ScrollSurface) {
        self.begins.set(self.begins.get() + 1);
    }

    fn did_scroll(&self, surface: &dyn ScrollSurface) {
        self.scrolls.borrow_mut().push(surface.content_offset());
    }

    fn will_end_dragging(
        &self,
        _surface: &dyn ScrollSurface,
        velocity: f32,
        target_offset: &mut f32,
    ) {
        self.releases.borrow_mut().push(velocity);
        if let Some(target) = self.target_override.get() {
            *target_offset = target;
        }
    }

    fn did_end_dragging(&self, _surface: &dyn ScrollSurface, _will_decelerate: bool) {
        self.ends.set(self.ends.get() + 1);
    }
}
