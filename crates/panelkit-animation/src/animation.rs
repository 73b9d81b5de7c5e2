//! Easing curves and tween specifications.

/// Linear interpolation between `start` and `end`.
pub fn lerp(start: f32, end: f32, fraction: f32) -> f32 {
    start + (end - start) * fraction
}

/// Easing functions mapping a linear fraction in `[0, 1]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing. Used wherever a value has to follow the finger 1:1.
    #[default]
    Linear,
    /// Cubic ease in and out. Used for programmatic snaps.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear fraction.
    ///
    /// Inputs outside `[0, 1]` are clamped and NaN maps to 0.
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        match self {
            Easing::Linear => fraction,
            Easing::EaseInOut => ease_in_out(fraction),
        }
    }
}

/// Control point abscissas of the ease-in-out curve; the ordinates are 0
/// and 1.
const EASE_IN_OUT_X1: f32 = 0.42;
const EASE_IN_OUT_X2: f32 = 0.58;

/// One coordinate of a cubic bezier from 0 to 1 with inner control values
/// `p1` and `p2`.
fn bezier(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// `fraction` is clamped to `[0, 1]` by the caller.
fn ease_in_out(fraction: f32) -> f32 {
    // x(t) is monotonic on [0, 1], so bisection finds the curve parameter.
    let (mut low, mut high) = (0.0f32, 1.0f32);
    let mut t = fraction;
    for _ in 0..24 {
        let x = bezier(EASE_IN_OUT_X1, EASE_IN_OUT_X2, t);
        if (x - fraction).abs() < 1e-6 {
            break;
        }
        if x < fraction {
            low = t;
        } else {
            high = t;
        }
        t = 0.5 * (low + high);
    }
    bezier(0.0, 1.0, t)
}

/// Tween specification: duration and time curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds. Zero applies the target immediately.
    pub duration_millis: u64,
    /// Time curve of the tween.
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Ease-in-out tween used for programmatic snaps.
    pub fn snap(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::EaseInOut)
    }

    /// A spec that completes synchronously.
    pub fn immediate() -> Self {
        Self::tween(0, Easing::Linear)
    }

    pub fn is_immediate(&self) -> bool {
        self.duration_millis == 0
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::snap(250)
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
