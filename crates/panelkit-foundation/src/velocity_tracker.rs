//! Pointer velocity estimation for release handling.
//!
//! Impulse strategy: the velocity is derived from the kinetic energy the
//! recent samples imparted, which is robust against jittery touch input.

use smallvec::SmallVec;

/// Ring buffer capacity.
const HISTORY_SIZE: usize = 20;

/// Only samples newer than this, relative to the newest one, contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct TimedPosition {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
///
/// ```ignore
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(time_ms, position);
/// let points_per_second = tracker.calculate_velocity();
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<TimedPosition>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records the pointer position at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(TimedPosition { time_ms, position });
    }

    /// Velocity in units per second; 0 without enough recent movement.
    pub fn calculate_velocity(&self) -> f32 {
        let window = self.recent_window();
        if window.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&window) * 1000.0
    }

    /// Samples that still describe the current motion, oldest first.
    ///
    /// Walks back from the newest sample and stops at the horizon or at the
    /// first pause longer than [`ASSUME_STOPPED_MS`].
    fn recent_window(&self) -> SmallVec<[TimedPosition; HISTORY_SIZE]> {
        let mut window: SmallVec<[TimedPosition; HISTORY_SIZE]> = SmallVec::new();
        let Some(newest) = self.samples[self.newest] else {
            return window;
        };
        let mut cursor = self.newest;
        while let Some(sample) = self.samples[cursor] {
            let paused = window
                .last()
                .is_some_and(|later| later.time_ms - sample.time_ms > ASSUME_STOPPED_MS);
            if paused || newest.time_ms - sample.time_ms > HORIZON_MS {
                break;
            }
            window.push(sample);
            if window.len() == HISTORY_SIZE {
                break;
            }
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }
        window.reverse();
        window
    }

    /// Velocity in units per second clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// Accumulates the kinetic energy each consecutive pair adds, in units
/// per millisecond. The first pair only contributes half.
fn impulse_velocity(window: &[TimedPosition]) -> f32 {
    let mut work = 0.0f32;
    for (index, pair) in window.windows(2).enumerate() {
        let (older, newer) = (pair[0], pair[1]);
        let elapsed = (newer.time_ms - older.time_ms) as f32;
        if elapsed == 0.0 {
            continue;
        }
        let velocity = (newer.position - older.position) / elapsed;
        work += (velocity - energy_to_velocity(work)) * velocity.abs();
        if index == 0 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// E = ½·v² with unit mass.
#[inline]
fn energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
