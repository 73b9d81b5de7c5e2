//! Animation primitives for panelkit.
//!
//! Provides easing curves, tween specifications and the [`Interpolator`],
//! a progress-driven scalar that can either track a gesture directly or
//! animate to a target on the runtime's frame clock.

pub mod animation;
pub mod interpolator;

pub use animation::{lerp, AnimationSpec, Easing};
pub use interpolator::{Interpolator, Sample};

pub mod prelude {
    pub use crate::animation::{lerp, AnimationSpec, Easing};
    pub use crate::interpolator::{Interpolator, Sample};
}
