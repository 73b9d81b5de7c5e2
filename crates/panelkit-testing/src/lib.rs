//! Testing utilities and harness for panelkit

pub mod harness;
pub mod recording;
pub mod scroll_view;

pub use harness::PanelHarness;
pub use recording::{RecordingDelegate, RecordingHost};
pub use scroll_view::{FakeContent, FakeScrollView};

pub mod prelude {
    pub use crate::harness::*;
    pub use crate::recording::*;
    pub use crate::scroll_view::*;
}
