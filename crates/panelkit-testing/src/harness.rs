use std::rc::Rc;

use panelkit_core::{Runtime, FRAME_INTERVAL_NANOS, NANOS_PER_MILLI};
use panelkit_foundation::{PanEvent, PointerPhase, PointerSample};
use panelkit_sheet::{BottomPanel, PanelConfig, PanelContent, PanelError, PanelGeometry};

use crate::recording::RecordingHost;
use crate::scroll_view::{FakeContent, FakeScrollView};

/// Frames after which [`PanelHarness::pump_until_idle`] gives up.
const MAX_IDLE_FRAMES: usize = 600;

/// Screen used by [`PanelHarness::new`]: 800pt tall, no safe area.
pub const DEFAULT_SCREEN_HEIGHT: f32 = 800.0;

/// Headless harness for exercising a [`BottomPanel`].
///
/// Owns the runtime, a [`RecordingHost`] and a [`FakeScrollView`] hosted as
/// the panel's content, and advances frame time in 60 Hz steps without a
/// windowing backend.
pub struct PanelHarness {
    runtime: Runtime,
    host: Rc<RecordingHost>,
    scroll_view: Rc<FakeScrollView>,
    panel: BottomPanel,
    frame_time_nanos: u64,
    pointer_time_ms: i64,
}

impl PanelHarness {
    /// Panel with scrolling content, laid out on the default screen.
    pub fn new(config: PanelConfig) -> Result<Self, PanelError> {
        let harness = Self::without_geometry(config)?;
        harness.set_screen(DEFAULT_SCREEN_HEIGHT, 0.0)?;
        Ok(harness)
    }

    /// Panel with scrolling content whose geometry is not reported yet.
    pub fn without_geometry(config: PanelConfig) -> Result<Self, PanelError> {
        let runtime = Runtime::default();
        let host = Rc::new(RecordingHost::new());
        let scroll_view = FakeScrollView::new();
        let panel = BottomPanel::new(
            runtime.frame_clock(),
            host.clone(),
            FakeContent::scrolling(&scroll_view),
            config,
        )?;
        Ok(Self {
            runtime,
            host,
            scroll_view,
            panel,
            frame_time_nanos: 0,
            pointer_time_ms: 0,
        })
    }

    pub fn set_screen(&self, screen_height: f32, safe_area_top: f32) -> Result<(), PanelError> {
        let geometry = PanelGeometry::new(screen_height, safe_area_top)?;
        self.panel.set_geometry(geometry);
        Ok(())
    }

    pub fn panel(&self) -> &BottomPanel {
        &self.panel
    }

    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    pub fn scroll_view(&self) -> &Rc<FakeScrollView> {
        &self.scroll_view
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Replaces the content with a fresh scroll view and returns it.
    pub fn replace_with_scrolling(
        &mut self,
        config: PanelConfig,
    ) -> Result<Rc<FakeScrollView>, PanelError> {
        let scroll_view = FakeScrollView::new();
        self.replace(FakeContent::scrolling(&scroll_view), config)?;
        self.scroll_view = Rc::clone(&scroll_view);
        Ok(scroll_view)
    }

    pub fn replace(
        &self,
        content: Rc<dyn PanelContent>,
        config: PanelConfig,
    ) -> Result<(), PanelError> {
        self.panel.replace(content, config)
    }

    /// Drains one frame, 16.6ms after the previous one.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn pump_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Drains frames covering at least `millis` milliseconds.
    pub fn advance_millis(&mut self, millis: u64) {
        let end = self.frame_time_nanos + millis * NANOS_PER_MILLI;
        while self.frame_time_nanos < end {
            self.advance_frame();
        }
    }

    /// Drains frames until no callbacks are pending and returns how many
    /// frames that took.
    pub fn pump_until_idle(&mut self) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() {
            if frames >= MAX_IDLE_FRAMES {
                panic!("panel did not settle within {MAX_IDLE_FRAMES} frames");
            }
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Recognized pan on the panel: began, one change per movement, ended.
    pub fn pan(&self, movements: &[f32], velocity: f32) {
        self.panel.on_pan(PanEvent::Began);
        for &movement in movements {
            self.panel.on_pan(PanEvent::Changed { movement });
        }
        self.panel.on_pan(PanEvent::Ended { velocity });
    }

    /// Raw pointer drag on the panel through screen positions `ys`, one
    /// sample every `interval_ms`, lifted at the last position.
    pub fn pointer_drag(&mut self, ys: &[f32], interval_ms: i64) {
        let Some((&first, rest)) = ys.split_first() else {
            return;
        };
        let mut time = self.pointer_time_ms;
        self.panel
            .on_pointer(PointerSample::new(PointerPhase::Down, first, time));
        let mut last = first;
        for &y in rest {
            time += interval_ms;
            self.panel
                .on_pointer(PointerSample::new(PointerPhase::Move, y, time));
            last = y;
        }
        time += interval_ms;
        self.panel
            .on_pointer(PointerSample::new(PointerPhase::Up, last, time));
        // Leave a gap so the next drag starts with a fresh velocity history.
        self.pointer_time_ms = time + 1_000;
    }

    /// Scripted drag on the hosted scroll view.
    pub fn scroll(&self, offsets: &[f32], velocity: f32) -> f32 {
        self.scroll_view.drag(offsets, velocity)
    }
}
