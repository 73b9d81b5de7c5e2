//! Progress-driven interpolation between two endpoint values.
//!
//! An [`Interpolator`] owns a normalized progress in `[0, 1]` and a pair of
//! endpoint values. Every progress change recomputes the interpolated value
//! and pushes it synchronously through the apply callback, whether the
//! change comes from gesture tracking ([`Interpolator::set_progress`]) or
//! from a frame of a running tween ([`Interpolator::animate_to`]).
//!
//! Endpoints are fixed for the lifetime of an interpolator. When they need
//! to change, build a new one.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use panelkit_core::{FrameCallbackRegistration, FrameClock, NANOS_PER_MILLI};

use crate::animation::{lerp, AnimationSpec, Easing};

/// Progresses closer than this are treated as equal when starting a tween.
const PROGRESS_EPSILON: f32 = 1e-6;

/// Value pushed to the apply callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Normalized progress in `[0, 1]`.
    pub progress: f32,
    /// Interpolated value between the endpoints.
    pub value: f32,
}

type ApplyFn = Rc<RefCell<dyn FnMut(Sample)>>;
type CompletionFn = Box<dyn FnOnce(bool)>;

/// Animated scalar between two endpoints.
///
/// Cloning yields another handle to the same interpolator.
pub struct Interpolator {
    inner: Rc<RefCell<InterpolatorInner>>,
}

struct InterpolatorInner {
    label: &'static str,
    start_value: f32,
    end_value: f32,
    easing: Easing,
    progress: f32,
    clock: FrameClock,
    apply: ApplyFn,
    animation: Option<RunningAnimation>,
    generation: u64,
}

struct RunningAnimation {
    generation: u64,
    from: f32,
    target: f32,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_complete: Option<CompletionFn>,
}

impl InterpolatorInner {
    fn sample(&self) -> Sample {
        Sample {
            progress: self.progress,
            value: lerp(
                self.start_value,
                self.end_value,
                self.easing.transform(self.progress),
            ),
        }
    }
}

fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

fn sanitize_endpoint(label: &'static str, value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("{label}: non-finite endpoint {value} replaced with 0");
        0.0
    }
}

fn emit(label: &'static str, apply: &ApplyFn, sample: Sample) {
    match apply.try_borrow_mut() {
        Ok(mut apply) => {
            log::trace!(
                "{label}: progress {:.4} -> value {:.2}",
                sample.progress,
                sample.value
            );
            (&mut *apply)(sample)
        }
        Err(_) => log::warn!("{label}: re-entrant apply dropped"),
    }
}

impl Interpolator {
    /// Creates an interpolator at progress 0.
    ///
    /// Nothing is applied until the progress is first set or animated.
    pub fn new(
        label: &'static str,
        clock: FrameClock,
        start_value: f32,
        end_value: f32,
        easing: Easing,
        apply: impl FnMut(Sample) + 'static,
    ) -> Self {
        let apply: ApplyFn = Rc::new(RefCell::new(apply));
        let inner = InterpolatorInner {
            label,
            start_value: sanitize_endpoint(label, start_value),
            end_value: sanitize_endpoint(label, end_value),
            easing,
            progress: 0.0,
            clock,
            apply,
            animation: None,
            generation: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Linear interpolator, the mapping every panel axis uses.
    pub fn linear(
        label: &'static str,
        clock: FrameClock,
        start_value: f32,
        end_value: f32,
        apply: impl FnMut(Sample) + 'static,
    ) -> Self {
        Self::new(label, clock, start_value, end_value, Easing::Linear, apply)
    }

    pub fn label(&self) -> &'static str {
        self.inner.borrow().label
    }

    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().sample().value
    }

    pub fn start_value(&self) -> f32 {
        self.inner.borrow().start_value
    }

    pub fn end_value(&self) -> f32 {
        self.inner.borrow().end_value
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().animation.is_some()
    }

    /// Target progress of the running tween, if any.
    pub fn animation_target(&self) -> Option<f32> {
        self.inner
            .borrow()
            .animation
            .as_ref()
            .map(|animation| animation.target)
    }

    /// Sets the progress directly and applies the resulting value.
    ///
    /// Does not touch a running tween; callers that take over from an
    /// animation stop it first.
    pub fn set_progress(&self, progress: f32) {
        let (label, apply, sample) = {
            let mut inner = self.inner.borrow_mut();
            inner.progress = sanitize_progress(progress);
            (inner.label, Rc::clone(&inner.apply), inner.sample())
        };
        emit(label, &apply, sample);
    }

    /// Tweens the progress to `target`.
    ///
    /// A running tween is cancelled first and its completion receives
    /// `false`. `on_complete` receives `true` once the target is reached and
    /// `false` if this tween is itself superseded or stopped. Immediate specs
    /// and tweens that are already at their target complete synchronously.
    pub fn animate_to(
        &self,
        target: f32,
        spec: AnimationSpec,
        on_complete: Option<Box<dyn FnOnce(bool)>>,
    ) {
        let target = sanitize_progress(target);
        self.cancel_running();

        let from = self.progress();
        if spec.is_immediate() || (from - target).abs() < PROGRESS_EPSILON {
            self.set_progress(target);
            if let Some(on_complete) = on_complete {
                on_complete(true);
            }
            return;
        }

        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            let generation = inner.generation;
            log::debug!(
                "{}: animating {from:.3} -> {target:.3} over {}ms",
                inner.label,
                spec.duration_millis
            );
            inner.animation = Some(RunningAnimation {
                generation,
                from,
                target,
                spec,
                start_time_nanos: None,
                registration: None,
                on_complete,
            });
            generation
        };
        Self::schedule_frame(&self.inner, generation);
    }

    /// Freezes the progress wherever the running tween reached.
    pub fn stop_animation(&self) {
        self.cancel_running();
    }

    fn cancel_running(&self) {
        let cancelled = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.animation.take()
        };
        if let Some(mut animation) = cancelled {
            drop(animation.registration.take());
            if let Some(on_complete) = animation.on_complete.take() {
                on_complete(false);
            }
        }
    }

    fn schedule_frame(this: &Rc<RefCell<InterpolatorInner>>, generation: u64) {
        let clock = {
            let inner = this.borrow();
            match inner.animation.as_ref() {
                Some(animation)
                    if animation.generation == generation && animation.registration.is_none() =>
                {
                    inner.clock.clone()
                }
                _ => return,
            }
        };
        let weak: Weak<RefCell<InterpolatorInner>> = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time, generation);
            }
        });
        if let Some(animation) = this.borrow_mut().animation.as_mut() {
            if animation.generation == generation {
                animation.registration = Some(registration);
            }
        }
    }

    fn on_frame(this: &Rc<RefCell<InterpolatorInner>>, frame_time_nanos: u64, generation: u64) {
        let (label, apply, sample, completion, finished) = {
            let mut inner = this.borrow_mut();
            let Some(animation) = inner.animation.as_mut() else {
                return;
            };
            if animation.generation != generation {
                return;
            }
            animation.registration = None;

            let start_time = *animation.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let duration_nanos = (animation.spec.duration_millis * NANOS_PER_MILLI).max(1);
            let fraction = (elapsed_nanos as f64 / duration_nanos as f64).clamp(0.0, 1.0) as f32;
            let finished = fraction >= 1.0;
            let progress = if finished {
                animation.target
            } else {
                let eased = animation.spec.easing.transform(fraction);
                lerp(animation.from, animation.target, eased)
            };

            inner.progress = sanitize_progress(progress);
            let completion = if finished {
                inner
                    .animation
                    .take()
                    .and_then(|mut animation| animation.on_complete.take())
            } else {
                None
            };
            (
                inner.label,
                Rc::clone(&inner.apply),
                inner.sample(),
                completion,
                finished,
            )
        };

        emit(label, &apply, sample);

        if finished {
            if let Some(on_complete) = completion {
                on_complete(true);
            }
        } else {
            Self::schedule_frame(this, generation);
        }
    }
}

impl Clone for Interpolator {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Interpolator")
            .field("label", &inner.label)
            .field("start_value", &inner.start_value)
            .field("end_value", &inner.end_value)
            .field("progress", &inner.progress)
            .field("animating", &inner.animation.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/interpolator_tests.rs"]
mod tests;
