//! Panel configuration and fixed visual metrics.

use crate::error::PanelError;

/// Fixed metrics shared by every panel.
pub struct PanelStyle;

impl PanelStyle {
    /// Duration of snaps, show/hide and content transitions.
    pub const ANIMATION_DURATION_MILLIS: u64 = 250;
    /// Top corner radius while collapsed.
    pub const CORNER_RADIUS: f32 = 20.0;
    /// Top corner radius once fully expanded.
    pub const EXPANDED_CORNER_RADIUS: f32 = 0.0;
    pub const HANDLE_MAX_OPACITY: f32 = 0.5;
    /// Strip above the content container that holds the drag handle.
    pub const HANDLE_SPACE_HEIGHT: f32 = 20.0;
}

/// Behaviour of a panel.
///
/// ```
/// use panelkit_sheet::PanelConfig;
///
/// let config = PanelConfig::default()
///     .with_collapsed_height(320.0)
///     .with_expandable(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelConfig {
    /// Height of the collapsed panel including the handle strip.
    pub collapsed_height: f32,
    pub is_expandable: bool,
    /// Whether dragging down from the collapsed state dismisses the panel.
    pub closing_by_gesture: bool,
    /// Dim the background fully even while collapsed.
    pub background_dimming_on_collapsed_state: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            collapsed_height: 400.0,
            is_expandable: true,
            closing_by_gesture: true,
            background_dimming_on_collapsed_state: false,
        }
    }
}

impl PanelConfig {
    pub fn with_collapsed_height(mut self, collapsed_height: f32) -> Self {
        self.collapsed_height = collapsed_height;
        self
    }

    pub fn with_expandable(mut self, is_expandable: bool) -> Self {
        self.is_expandable = is_expandable;
        self
    }

    pub fn with_closing_by_gesture(mut self, closing_by_gesture: bool) -> Self {
        self.closing_by_gesture = closing_by_gesture;
        self
    }

    pub fn with_background_dimming_on_collapsed_state(mut self, dimming: bool) -> Self {
        self.background_dimming_on_collapsed_state = dimming;
        self
    }

    pub fn validate(&self) -> Result<(), PanelError> {
        if self.collapsed_height.is_finite() && self.collapsed_height > 0.0 {
            Ok(())
        } else {
            Err(PanelError::InvalidCollapsedHeight(self.collapsed_height))
        }
    }

    /// Whether any drag on the panel can move it.
    pub fn allows_gestures(&self) -> bool {
        self.is_expandable || self.closing_by_gesture
    }

    /// Height of the content container while collapsed.
    pub fn collapsed_container_height(&self) -> f32 {
        (self.collapsed_height - PanelStyle::HANDLE_SPACE_HEIGHT).max(0.0)
    }

    /// Handle opacity at height progress 0.
    pub(crate) fn handle_opacity(&self) -> f32 {
        if self.allows_gestures() {
            PanelStyle::HANDLE_MAX_OPACITY
        } else {
            0.0
        }
    }

    /// Background dimming for the given axis progresses.
    pub fn dimming_opacity(&self, height_progress: f32, close_progress: f32) -> f32 {
        let dim_collapsed = self.background_dimming_on_collapsed_state;
        if close_progress != 0.0 && dim_collapsed {
            1.0 - close_progress
        } else if dim_collapsed {
            1.0
        } else {
            height_progress
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
