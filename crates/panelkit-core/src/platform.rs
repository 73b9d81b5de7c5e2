//! What the runtime needs from the host's event loop.
//!
//! The runtime never sleeps or spins. It asks the host for a frame when the
//! first callback becomes pending and relies on the host to drain it with a
//! timestamp from its own monotonic clock.

/// Host hook for requesting a vsync.
///
/// Called from the UI thread, but the host may forward the request to
/// another thread (e.g. a window event loop proxy), hence the bounds.
pub trait RuntimeScheduler: Send + Sync {
    /// At least one frame callback is pending.
    fn schedule_frame(&self);
}

/// Monotonic time source used to stamp drained frames.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync;

    fn now(&self) -> Self::Instant;

    /// Nanoseconds since `since`, saturating on overflow.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}
