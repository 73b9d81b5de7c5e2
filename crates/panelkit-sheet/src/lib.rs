//! Bottom sheet interaction for panelkit.
//!
//! A [`BottomPanel`] sits over application content, snaps between a
//! collapsed and an expanded height, can be dragged off screen, and takes
//! over scroll drags from the content it hosts when the content is already
//! at its boundary.
//!
//! The pieces are usable on their own:
//!
//! * [`GestureTranslator`] maps drag movements onto the height or close axis.
//! * [`SnapResolver`] picks the resting state for a release velocity.
//! * [`PanelPosition::from_progress`] projects height progress onto a state.

mod config;
mod error;
mod geometry;
mod host;
mod panel;
mod position;
mod snap;
mod translator;

pub use config::{PanelConfig, PanelStyle};
pub use error::PanelError;
pub use geometry::{PanelGeometry, PanelMetrics};
pub use host::{Axis, PanelContent, PresentationHost};
pub use panel::{BottomPanel, Completion};
pub use position::PanelPosition;
pub use snap::{SnapDecision, SnapResolver};
pub use translator::{DragAxes, DragMode, DragSession, GestureTranslator};

pub mod prelude {
    pub use crate::{
        Axis, BottomPanel, PanelConfig, PanelContent, PanelGeometry, PanelPosition,
        PresentationHost,
    };
    pub use panelkit_foundation::{PanEvent, PointerPhase, PointerSample};
}
