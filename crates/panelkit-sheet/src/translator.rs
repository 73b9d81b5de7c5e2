//! Drag deltas to axis progress.
//!
//! A drag (direct pan on the panel or a scroll handed off by the content)
//! runs in one of two mutually exclusive modes. While resizing, upward
//! movement grows the panel toward expanded. While closing, downward
//! movement slides the panel off screen. Once a session closes, it keeps
//! closing until the finger lifts.

use panelkit_foundation::Handoff;

use crate::config::PanelConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Resizing,
    Closing,
}

/// State of one gesture, from touch down to release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    mode: Option<DragMode>,
    consumed: f32,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode the session settled into, if any movement was taken yet.
    pub fn mode(&self) -> Option<DragMode> {
        self.mode
    }

    /// Sum of the movements the panel consumed, upward positive.
    pub fn consumed(&self) -> f32 {
        self.consumed
    }

    pub fn is_closing(&self) -> bool {
        self.mode == Some(DragMode::Closing)
    }
}

/// The two progress axes a drag can move.
pub trait DragAxes {
    fn height_progress(&self) -> f32;
    fn close_progress(&self) -> f32;
    fn set_height_progress(&self, progress: f32);
    fn set_close_progress(&self, progress: f32);
    /// Points between collapsed and expanded.
    fn resize_span(&self) -> f32;
    /// Points the panel travels to leave the screen.
    fn close_span(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTranslator {
    is_expandable: bool,
    closing_by_gesture: bool,
}

impl GestureTranslator {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            is_expandable: config.is_expandable,
            closing_by_gesture: config.closing_by_gesture,
        }
    }

    /// Applies `movement` (points, upward positive) to the axis the session
    /// owns and reports whether the panel took it.
    pub fn translate(
        &self,
        session: &mut DragSession,
        axes: &dyn DragAxes,
        movement: f32,
    ) -> Handoff {
        if !movement.is_finite() || movement == 0.0 {
            return Handoff::Declined;
        }

        let height = axes.height_progress();
        if height >= 1.0 && movement > 0.0 {
            return Handoff::Declined;
        }

        let closing = session.is_closing()
            || (height <= 0.0 && movement < 0.0)
            || axes.close_progress() != 0.0;
        let handoff = if closing {
            self.close_by(session, axes, movement)
        } else {
            self.resize_by(session, axes, movement)
        };
        if handoff.is_consumed() {
            session.consumed += movement;
        }
        handoff
    }

    fn close_by(&self, session: &mut DragSession, axes: &dyn DragAxes, movement: f32) -> Handoff {
        if !self.closing_by_gesture {
            return Handoff::Declined;
        }
        let span = axes.close_span();
        if span <= 0.0 {
            return Handoff::Declined;
        }
        if !session.is_closing() {
            log::debug!("drag session entering closing mode");
            session.mode = Some(DragMode::Closing);
        }
        let progress = (axes.close_progress() - movement / span).clamp(0.0, 1.0);
        axes.set_close_progress(progress);
        Handoff::Consumed
    }

    fn resize_by(&self, session: &mut DragSession, axes: &dyn DragAxes, movement: f32) -> Handoff {
        if !self.is_expandable {
            return Handoff::Declined;
        }
        let span = axes.resize_span();
        if span <= 0.0 {
            return Handoff::Declined;
        }
        if session.mode.is_none() {
            log::debug!("drag session entering resizing mode");
            session.mode = Some(DragMode::Resizing);
        }
        let progress = (axes.height_progress() + movement / span).clamp(0.0, 1.0);
        axes.set_height_progress(progress);
        Handoff::Consumed
    }
}

#[cfg(test)]
#[path = "tests/translator_tests.rs"]
mod tests;
