//! Screen geometry reported by the host and the heights derived from it.

use crate::config::{PanelConfig, PanelStyle};
use crate::error::PanelError;

/// Screen metrics the panel lays itself out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    screen_height: f32,
    safe_area_top: f32,
}

impl PanelGeometry {
    pub fn new(screen_height: f32, safe_area_top: f32) -> Result<Self, PanelError> {
        let valid = screen_height.is_finite()
            && safe_area_top.is_finite()
            && screen_height > 0.0
            && safe_area_top >= 0.0
            && safe_area_top < screen_height;
        if !valid {
            log::warn!("rejecting geometry {screen_height}x{safe_area_top}");
            return Err(PanelError::InvalidGeometry {
                screen_height,
                safe_area_top,
            });
        }
        Ok(Self {
            screen_height,
            safe_area_top,
        })
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    pub fn safe_area_top(&self) -> f32 {
        self.safe_area_top
    }

    /// Height of the content container while fully expanded.
    pub fn expanded_container_height(&self) -> f32 {
        (self.screen_height - PanelStyle::HANDLE_SPACE_HEIGHT - self.safe_area_top).max(0.0)
    }
}

/// Endpoint heights of the resize axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMetrics {
    pub collapsed_height: f32,
    pub expanded_height: f32,
}

impl PanelMetrics {
    pub fn resolve(config: &PanelConfig, geometry: &PanelGeometry) -> Self {
        Self {
            collapsed_height: config.collapsed_container_height(),
            expanded_height: geometry.expanded_container_height(),
        }
    }

    /// Points of finger travel between collapsed and expanded.
    pub fn resize_span(&self) -> f32 {
        self.expanded_height - self.collapsed_height
    }

    /// Full panel height for a container height, i.e. the distance the
    /// panel travels to leave the screen.
    pub fn panel_height(container_height: f32) -> f32 {
        container_height + PanelStyle::HANDLE_SPACE_HEIGHT
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
