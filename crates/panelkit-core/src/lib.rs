//! Core runtime for panelkit.
//!
//! Everything in panelkit runs on one UI thread. The host owns the vsync
//! source: it asks the [`Runtime`] whether a frame is needed and calls
//! [`RuntimeHandle::drain_frame_callbacks`] once per frame. Animations
//! register one-shot callbacks through the [`FrameClock`].

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

pub(crate) type FrameCallbackId = u64;

/// Nanoseconds in one millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Frame interval of a 60 Hz display, in nanoseconds.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;
