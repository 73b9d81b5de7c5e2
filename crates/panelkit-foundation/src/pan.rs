//! Pan detection for drags on the panel surface itself.
//!
//! Raw pointer samples go in; [`PanEvent`]s come out once the pointer has
//! travelled past [`DRAG_THRESHOLD`]. Pointer coordinates are screen space
//! (y grows downward); emitted movements and velocities are panel space
//! (upward positive, velocity in points per millisecond).

use smallvec::SmallVec;

use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY, MILLIS_PER_SECOND};
use crate::velocity_tracker::VelocityTracker1D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    /// Vertical position in screen space.
    pub y: f32,
    pub time_ms: i64,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, y: f32, time_ms: i64) -> Self {
        Self { phase, y, time_ms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanEvent {
    Began,
    /// Movement since the previous event, upward positive.
    Changed { movement: f32 },
    /// Release velocity in points per millisecond, upward positive.
    Ended { velocity: f32 },
}

#[derive(Debug, Clone, Copy)]
enum PanState {
    Idle,
    Pressed { origin_y: f32 },
    Panning { last_y: f32 },
}

pub type PanEvents = SmallVec<[PanEvent; 2]>;

#[derive(Debug, Clone)]
pub struct PanGestureDetector {
    state: PanState,
    tracker: VelocityTracker1D,
    slop: f32,
}

impl Default for PanGestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGestureDetector {
    pub fn new() -> Self {
        Self::with_slop(DRAG_THRESHOLD)
    }

    pub fn with_slop(slop: f32) -> Self {
        Self {
            state: PanState::Idle,
            tracker: VelocityTracker1D::new(),
            slop: slop.max(0.0),
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning { .. })
    }

    pub fn on_pointer(&mut self, sample: PointerSample) -> PanEvents {
        let mut events = PanEvents::new();
        match (self.state, sample.phase) {
            (_, PointerPhase::Down) => {
                self.tracker.reset();
                self.tracker.add_data_point(sample.time_ms, sample.y);
                self.state = PanState::Pressed { origin_y: sample.y };
            }
            (PanState::Pressed { origin_y }, PointerPhase::Move) => {
                self.tracker.add_data_point(sample.time_ms, sample.y);
                if (sample.y - origin_y).abs() > self.slop {
                    events.push(PanEvent::Began);
                    events.push(PanEvent::Changed {
                        movement: origin_y - sample.y,
                    });
                    self.state = PanState::Panning { last_y: sample.y };
                }
            }
            (PanState::Panning { last_y }, PointerPhase::Move) => {
                self.tracker.add_data_point(sample.time_ms, sample.y);
                if sample.y != last_y {
                    events.push(PanEvent::Changed {
                        movement: last_y - sample.y,
                    });
                    self.state = PanState::Panning { last_y: sample.y };
                }
            }
            (PanState::Panning { .. }, PointerPhase::Up) => {
                self.tracker.add_data_point(sample.time_ms, sample.y);
                let screen_velocity = self.tracker.calculate_velocity_with_max(MAX_FLING_VELOCITY);
                events.push(PanEvent::Ended {
                    velocity: -screen_velocity / MILLIS_PER_SECOND,
                });
                self.state = PanState::Idle;
            }
            (PanState::Panning { .. }, PointerPhase::Cancel) => {
                events.push(PanEvent::Ended { velocity: 0.0 });
                self.state = PanState::Idle;
            }
            (_, PointerPhase::Up | PointerPhase::Cancel) => {
                self.state = PanState::Idle;
            }
            (PanState::Idle, PointerPhase::Move) => {}
        }
        events
    }
}

#[cfg(test)]
#[path = "tests/pan_tests.rs"]
mod tests;
