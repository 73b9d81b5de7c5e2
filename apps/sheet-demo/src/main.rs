mod list;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use panelkit_core::FRAME_INTERVAL_NANOS;
use panelkit_foundation::{PointerPhase, PointerSample};
use panelkit_runtime_std::StdRuntime;
use panelkit_sheet::{
    Axis, BottomPanel, PanelConfig, PanelError, PanelGeometry, PresentationHost,
};

use crate::list::{DemoContent, DemoList};

const SCREEN_HEIGHT: f32 = 844.0;
const SAFE_AREA_TOP: f32 = 47.0;

/// Host that keeps the latest value per axis and traces every update.
#[derive(Default)]
struct ConsoleHost {
    values: RefCell<HashMap<Axis, f32>>,
}

impl ConsoleHost {
    fn summary(&self) -> String {
        let values = self.values.borrow();
        let value = |axis| values.get(&axis).copied().unwrap_or(f32::NAN);
        format!(
            "height {:6.1}  translation {:6.1}  radius {:4.1}  handle {:.2}  dimming {:.2}",
            value(Axis::Height),
            value(Axis::CloseTranslation),
            value(Axis::CornerRadius),
            value(Axis::HandleOpacity),
            value(Axis::DimmingOpacity),
        )
    }
}

impl PresentationHost for ConsoleHost {
    fn apply(&self, axis: Axis, value: f32) {
        log::trace!("{axis:?} = {value:.2}");
        self.values.borrow_mut().insert(axis, value);
    }
}

/// Drives frames in real time until nothing is animating.
fn run_until_idle(runtime: &StdRuntime) {
    let handle = runtime.runtime_handle();
    while runtime.take_frame_request() || handle.has_frame_callbacks() {
        std::thread::sleep(Duration::from_nanos(FRAME_INTERVAL_NANOS));
        runtime.drain_frame();
    }
}

/// Pointer drag on the panel between two screen positions.
fn pointer_drag(panel: &BottomPanel, from_y: f32, to_y: f32, steps: usize, time_ms: &mut i64) {
    panel.on_pointer(PointerSample::new(PointerPhase::Down, from_y, *time_ms));
    for step in 1..=steps {
        *time_ms += 8;
        let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
        panel.on_pointer(PointerSample::new(PointerPhase::Move, y, *time_ms));
    }
    *time_ms += 8;
    panel.on_pointer(PointerSample::new(PointerPhase::Up, to_y, *time_ms));
    *time_ms += 500;
}

fn report(step: &str, panel: &BottomPanel, host: &ConsoleHost) {
    println!(
        "{step:<34} {:?} | {}",
        panel.current_panel_position(),
        host.summary()
    );
}

fn main() -> Result<(), PanelError> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== panelkit bottom sheet demo ===");
    println!("Set RUST_LOG=debug to see gesture and snap decisions.");
    println!();

    let runtime = StdRuntime::new();
    let host = Rc::new(ConsoleHost::default());
    let list = DemoList::new(60, 44.0);
    let panel = BottomPanel::new(
        runtime.frame_clock(),
        host.clone(),
        Rc::new(DemoContent::List(Rc::clone(&list))),
        PanelConfig::default().with_collapsed_height(360.0),
    )?;
    panel.set_on_position_changed(|position| log::info!("position changed: {position:?}"));
    panel.set_on_closed_with_gesture(|| log::info!("panel dismissed by gesture"));

    panel.show(
        true,
        Some(Box::new(|finished| log::info!("show finished: {finished}"))),
    );
    panel.set_geometry(PanelGeometry::new(SCREEN_HEIGHT, SAFE_AREA_TOP)?);
    run_until_idle(&runtime);
    report("shown", &panel, &host);

    let mut time_ms = 0;
    pointer_drag(&panel, 520.0, 300.0, 12, &mut time_ms);
    run_until_idle(&runtime);
    report("dragged handle up", &panel, &host);

    list.drag(&[-120.0, -400.0, -650.0], -0.4);
    run_until_idle(&runtime);
    println!("list scrolled to row {}", list.first_visible_row());

    list.drag(&[-400.0, 0.0, 80.0, 260.0], 1.2);
    run_until_idle(&runtime);
    report("pulled list down past its top", &panel, &host);

    list.drag(&[-30.0, -90.0], -1.4);
    run_until_idle(&runtime);
    report("flicked list up", &panel, &host);

    panel.replace(
        Rc::new(DemoContent::Card),
        PanelConfig::default()
            .with_collapsed_height(240.0)
            .with_background_dimming_on_collapsed_state(true),
    )?;
    report("replaced with card", &panel, &host);
    run_until_idle(&runtime);
    report("card transition done", &panel, &host);

    pointer_drag(&panel, 620.0, 820.0, 10, &mut time_ms);
    run_until_idle(&runtime);
    report("dragged card down", &panel, &host);

    Ok(())
}
