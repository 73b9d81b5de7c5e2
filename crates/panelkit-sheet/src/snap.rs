//! Release velocity and progress to a resting state.

use panelkit_foundation::SNAP_VELOCITY_THRESHOLD;

use crate::position::PanelPosition;

/// Where a released panel settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDecision {
    /// Animate the height axis to a discrete state.
    Resize(PanelPosition),
    /// Slide the panel back fully on screen.
    Restore,
    /// Slide the panel off screen and report it closed.
    Dismiss,
}

impl SnapDecision {
    /// Progress the snapped axis animates to.
    pub fn target_progress(self) -> f32 {
        match self {
            SnapDecision::Resize(position) => position.progress(),
            SnapDecision::Restore => 0.0,
            SnapDecision::Dismiss => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolver {
    velocity_threshold: f32,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapResolver {
    pub fn new() -> Self {
        Self::with_threshold(SNAP_VELOCITY_THRESHOLD)
    }

    /// `velocity_threshold` in points per millisecond.
    pub fn with_threshold(velocity_threshold: f32) -> Self {
        Self {
            velocity_threshold: velocity_threshold.abs(),
        }
    }

    pub fn velocity_threshold(&self) -> f32 {
        self.velocity_threshold
    }

    /// Settles a closing drag. `velocity` is upward positive, so a downward
    /// fling continues the dismissal.
    pub fn resolve_closing(&self, close_progress: f32, velocity: f32) -> SnapDecision {
        let continuation = -sanitize(velocity);
        let decision = if continuation < self.velocity_threshold || close_progress < 0.5 {
            SnapDecision::Restore
        } else {
            SnapDecision::Dismiss
        };
        log::debug!(
            "closing release at {close_progress:.3} with {continuation:.3}pt/ms: {decision:?}"
        );
        decision
    }

    /// Settles a resizing drag. A fling away from `position` switches to the
    /// opposite state; anything else goes to the nearest one.
    pub fn resolve_resizing(
        &self,
        position: PanelPosition,
        height_progress: f32,
        velocity: f32,
    ) -> SnapDecision {
        let velocity = sanitize(velocity);
        let away = match position {
            PanelPosition::Collapsed => velocity > 0.0,
            PanelPosition::Expanded => velocity < 0.0,
        };
        let target = if velocity.abs() > self.velocity_threshold && away {
            position.opposite()
        } else if height_progress > 0.5 {
            PanelPosition::Expanded
        } else {
            PanelPosition::Collapsed
        };
        log::debug!(
            "resizing release from {position:?} at {height_progress:.3} \
             with {velocity:.3}pt/ms: {target:?}"
        );
        SnapDecision::Resize(target)
    }
}

fn sanitize(velocity: f32) -> f32 {
    if velocity.is_finite() {
        velocity
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "tests/snap_tests.rs"]
mod tests;
