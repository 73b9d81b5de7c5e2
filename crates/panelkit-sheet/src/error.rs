use std::fmt;

/// Errors reported while configuring a panel.
///
/// Interaction itself never fails: gestures outside the valid domain are
/// clamped or declined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelError {
    /// The collapsed height must be a finite, positive number of points.
    InvalidCollapsedHeight(f32),
    InvalidGeometry { screen_height: f32, safe_area_top: f32 },
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::InvalidCollapsedHeight(height) => {
                write!(f, "collapsed height must be positive and finite, got {height}")
            }
            PanelError::InvalidGeometry {
                screen_height,
                safe_area_top,
            } => write!(
                f,
                "invalid screen geometry: height {screen_height}, safe area top {safe_area_top}"
            ),
        }
    }
}

impl std::error::Error for PanelError {}
