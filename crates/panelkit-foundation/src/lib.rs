//! Input plumbing for panelkit.
//!
//! * [`scroll_surface`]: the one-delegate-slot scrollable surface contract.
//! * [`delegate_proxy`]: fan-out of one delegate slot to several listeners.
//! * [`scroll_handoff`]: the arbiter that hands scroll deltas to a panel.
//! * [`pan`]: pointer samples to pan events with release velocity.

pub mod delegate_proxy;
pub mod gesture_constants;
pub mod pan;
pub mod scroll_handoff;
pub mod scroll_surface;
pub mod velocity_tracker;

pub use delegate_proxy::ScrollDelegateProxy;
pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY, SNAP_VELOCITY_THRESHOLD};
pub use pan::{PanEvent, PanGestureDetector, PointerPhase, PointerSample};
pub use scroll_handoff::{Deceleration, Handoff, ScrollHandoff, ScrollOwnership, ScrollerDelegate};
pub use scroll_surface::{ScrollDelegate, ScrollSurface};
pub use velocity_tracker::VelocityTracker1D;
