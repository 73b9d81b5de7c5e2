//! Shared gesture constants.
//!
//! Distances are logical points. Velocities handed to the panel are in
//! points per millisecond; the tracker works in points per second.

/// Distance the pointer has to travel before a press becomes a pan.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Release speed, in points per millisecond, above which a release counts
/// as a fling.
pub const SNAP_VELOCITY_THRESHOLD: f32 = 0.8;

/// Upper bound for tracked pointer velocity, in points per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Milliseconds per second, for converting tracker output.
pub const MILLIS_PER_SECOND: f32 = 1_000.0;
