//! Standard runtime services for panelkit.
//!
//! Concrete implementations of the platform traits defined in
//! `panelkit-core`. A host event loop constructs a [`StdRuntime`], waits
//! for [`StdRuntime::take_frame_request`] and calls
//! [`StdRuntime::drain_frame`] on every vsync.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use panelkit_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::Instant;

type FrameWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Latches frame requests until the host loop collects them.
///
/// A host that blocks between frames installs a waker to be told about new
/// requests; a polling host only calls [`take_frame_request`].
///
/// [`take_frame_request`]: StdScheduler::take_frame_request
#[derive(Default)]
pub struct StdScheduler {
    pending: AtomicBool,
    waker: Mutex<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears and returns the pending request.
    pub fn take_frame_request(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.replace_waker(Some(Arc::new(waker)));
    }

    pub fn clear_frame_waker(&self) {
        self.replace_waker(None);
    }

    fn replace_waker(&self, waker: Option<FrameWaker>) {
        match self.waker.lock() {
            Ok(mut slot) => *slot = waker,
            Err(_) => log::warn!("frame waker lock poisoned; waker unchanged"),
        }
    }

    fn current_waker(&self) -> Option<FrameWaker> {
        self.waker.lock().ok().and_then(|slot| slot.clone())
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("pending", &self.pending.load(Ordering::Acquire))
            .field("has_waker", &self.current_waker().is_some())
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.pending.store(true, Ordering::Release);
        // Called outside the lock so the waker may touch the scheduler.
        if let Some(waker) = self.current_waker() {
            waker();
        }
    }
}

/// Monotonic clock backed by [`web_time::Instant`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Convenience container bundling the standard scheduler, clock and runtime.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    origin: Instant,
    runtime: Runtime,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let clock = Arc::new(StdClock);
        Self {
            scheduler,
            origin: clock.now(),
            clock,
            runtime,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Nanoseconds since this runtime was created.
    pub fn now_nanos(&self) -> u64 {
        self.clock.elapsed_nanos(self.origin)
    }

    /// Drains pending frame callbacks stamped with the current time and
    /// returns the timestamp used.
    pub fn drain_frame(&self) -> u64 {
        let now = self.now_nanos();
        self.runtime.handle().drain_frame_callbacks(now);
        now
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
