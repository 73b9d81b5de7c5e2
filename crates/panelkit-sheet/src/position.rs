/// Discrete resting state of the panel's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPosition {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelPosition {
    /// Projects a height progress onto a discrete state.
    ///
    /// Only the exact boundaries map to a state; anything in between yields
    /// `None` and the caller keeps the last state it saw.
    pub fn from_progress(progress: f32) -> Option<Self> {
        if progress <= 0.0 {
            Some(PanelPosition::Collapsed)
        } else if progress >= 1.0 {
            Some(PanelPosition::Expanded)
        } else {
            None
        }
    }

    /// Height progress of this state.
    pub fn progress(self) -> f32 {
        match self {
            PanelPosition::Collapsed => 0.0,
            PanelPosition::Expanded => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            PanelPosition::Collapsed => PanelPosition::Expanded,
            PanelPosition::Expanded => PanelPosition::Collapsed,
        }
    }
}
