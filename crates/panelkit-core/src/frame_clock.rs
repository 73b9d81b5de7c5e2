//! Per-frame scheduling for animations.
//!
//! A [`FrameClock`] hands out one-shot callbacks that run with the timestamp
//! of the next frame the host drains. Each callback is tied to the
//! [`FrameCallbackRegistration`] it returns: an interpolator keeps the
//! registration while it waits for a frame and drops it to stop waiting.

use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Cloneable access to a runtime's frame callbacks.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Runs `callback` with the timestamp of the next drained frame.
    ///
    /// Once the runtime is gone the registration is inert and the callback
    /// never runs.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        if id.is_none() {
            log::warn!("frame callback registered after runtime shutdown");
        }
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }
}

/// Keeps a frame callback pending; dropping it withdraws the callback.
#[must_use = "dropping the registration cancels the frame callback"]
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    fn withdraw(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.withdraw();
    }
}
