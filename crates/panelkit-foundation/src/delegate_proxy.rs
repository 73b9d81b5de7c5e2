//! One delegate slot, many listeners.
//!
//! [`ScrollDelegateProxy`] is installed in a surface's single delegate slot
//! and forwards every callback to a decision-bearing primary and to any
//! number of side-effect-only secondaries. Callbacks that carry a decision
//! (the rewritable target offset of `will_end_dragging`) resolve the same
//! way regardless of listener order: every listener sees the proposal the
//! surface made, and the primary's rewrite wins over any secondary's.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::scroll_surface::{ScrollDelegate, ScrollSurface};

pub struct ScrollDelegateProxy {
    primary: Rc<dyn ScrollDelegate>,
    secondaries: SmallVec<[Rc<dyn ScrollDelegate>; 2]>,
}

impl ScrollDelegateProxy {
    pub fn new(primary: Rc<dyn ScrollDelegate>) -> Self {
        Self {
            primary,
            secondaries: SmallVec::new(),
        }
    }

    pub fn with_secondary(mut self, delegate: Rc<dyn ScrollDelegate>) -> Self {
        self.secondaries.push(delegate);
        self
    }

    pub fn with_secondaries(
        mut self,
        delegates: impl IntoIterator<Item = Rc<dyn ScrollDelegate>>,
    ) -> Self {
        self.secondaries.extend(delegates);
        self
    }

    pub fn primary(&self) -> &Rc<dyn ScrollDelegate> {
        &self.primary
    }

    pub fn secondaries(&self) -> &[Rc<dyn ScrollDelegate>] {
        &self.secondaries
    }

    /// Number of listeners, primary included.
    pub fn listener_count(&self) -> usize {
        1 + self.secondaries.len()
    }

    fn listeners(&self) -> impl Iterator<Item = &Rc<dyn ScrollDelegate>> {
        std::iter::once(&self.primary).chain(self.secondaries.iter())
    }
}

impl ScrollDelegate for ScrollDelegateProxy {
    fn will_begin_dragging(&self, surface: &dyn ScrollSurface) {
        for listener in self.listeners() {
            listener.will_begin_dragging(surface);
        }
    }

    fn did_scroll(&self, surface: &dyn ScrollSurface) {
        for listener in self.listeners() {
            listener.did_scroll(surface);
        }
    }

    fn will_end_dragging(
        &self,
        surface: &dyn ScrollSurface,
        velocity: f32,
        target_offset: &mut f32,
    ) {
        let proposed = *target_offset;

        let mut primary_target = proposed;
        self.primary
            .will_end_dragging(surface, velocity, &mut primary_target);

        let mut secondary_target = None;
        for secondary in &self.secondaries {
            let mut target = proposed;
            secondary.will_end_dragging(surface, velocity, &mut target);
            if secondary_target.is_none() && target != proposed {
                secondary_target = Some(target);
            }
        }

        *target_offset = if primary_target != proposed {
            primary_target
        } else {
            secondary_target.unwrap_or(proposed)
        };
    }

    fn did_end_dragging(&self, surface: &dyn ScrollSurface, will_decelerate: bool) {
        for listener in self.listeners() {
            listener.did_end_dragging(surface, will_decelerate);
        }
    }
}

#[cfg(test)]
#[path = "tests/delegate_proxy_tests.rs"]
mod tests;
