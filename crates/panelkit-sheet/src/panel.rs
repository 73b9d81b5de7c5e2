//! The bottom panel state machine.
//!
//! [`BottomPanel`] owns one interpolator per axis and routes every input
//! through the same path: a drag session starts, the [`GestureTranslator`]
//! turns movements into progress, and on release the [`SnapResolver`]
//! picks the resting state the axes animate to. Direct pans and scroll
//! drags handed off by the content share that path, so a gesture that
//! starts in a list and continues on the panel behaves as one.
//!
//! All state lives behind a `RefCell`. Interpolator apply callbacks borrow
//! it themselves, so no borrow is ever held while an interpolator runs.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use panelkit_animation::{AnimationSpec, Interpolator, Sample};
use panelkit_core::FrameClock;
use panelkit_foundation::{
    Deceleration, Handoff, PanEvent, PanGestureDetector, PointerSample, ScrollHandoff,
    ScrollOwnership, ScrollerDelegate,
};

use crate::config::{PanelConfig, PanelStyle};
use crate::error::PanelError;
use crate::geometry::{PanelGeometry, PanelMetrics};
use crate::host::{Axis, PanelContent, PresentationHost};
use crate::position::PanelPosition;
use crate::snap::{SnapDecision, SnapResolver};
use crate::translator::{DragAxes, DragMode, DragSession, GestureTranslator};

/// Called once with `true` when an animation reached its target, or with
/// `false` when it was cancelled.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Container heights closer than this are treated as equal.
const HEIGHT_EPSILON: f32 = 0.5;

fn snap_spec() -> AnimationSpec {
    AnimationSpec::snap(PanelStyle::ANIMATION_DURATION_MILLIS)
}

fn visibility_spec(animated: bool) -> AnimationSpec {
    if animated {
        snap_spec()
    } else {
        AnimationSpec::immediate()
    }
}

/// Height and close axes, which only exist once geometry is known.
#[derive(Clone)]
struct PanelAxes {
    metrics: PanelMetrics,
    height: Interpolator,
    close: Interpolator,
}

impl DragAxes for PanelAxes {
    fn height_progress(&self) -> f32 {
        self.height.progress()
    }

    fn close_progress(&self) -> f32 {
        self.close.progress()
    }

    fn set_height_progress(&self, progress: f32) {
        self.height.stop_animation();
        self.height.set_progress(progress);
    }

    fn set_close_progress(&self, progress: f32) {
        self.close.stop_animation();
        self.close.set_progress(progress);
    }

    fn resize_span(&self) -> f32 {
        self.metrics.resize_span()
    }

    fn close_span(&self) -> f32 {
        self.close.end_value()
    }
}

struct PendingVisibility {
    visible: bool,
    animated: bool,
    completion: Option<Completion>,
}

struct PanelState {
    config: PanelConfig,
    content: Rc<dyn PanelContent>,
    geometry: Option<PanelGeometry>,
    axes: Option<PanelAxes>,
    corner_radius: Interpolator,
    handle_opacity: Interpolator,
    /// Short-lived height animation after the content was replaced.
    transition: Option<Interpolator>,
    position: PanelPosition,
    session: DragSession,
    pan: PanGestureDetector,
    /// Last container height pushed to the host.
    height_constant: Option<f32>,
    pending: Option<PendingVisibility>,
}

#[derive(Default)]
struct Observers {
    on_closed_with_gesture: Option<Box<dyn FnMut()>>,
    on_position_changed: Option<Box<dyn FnMut(PanelPosition)>>,
}

struct PanelShared {
    weak_self: Weak<PanelShared>,
    clock: FrameClock,
    host: Rc<dyn PresentationHost>,
    handoff: ScrollHandoff,
    state: RefCell<PanelState>,
    observers: RefCell<Observers>,
}

/// A draggable, resizable overlay panel.
///
/// The host reports geometry with [`set_geometry`](Self::set_geometry),
/// forwards pointer input to [`on_pointer`](Self::on_pointer) (or already
/// recognized pans to [`on_pan`](Self::on_pan)) and drains the frame clock
/// once per vsync. In return it receives every axis value through its
/// [`PresentationHost`].
pub struct BottomPanel {
    shared: Rc<PanelShared>,
}

fn host_axis(
    label: &'static str,
    clock: &FrameClock,
    host: &Rc<dyn PresentationHost>,
    axis: Axis,
    start: f32,
    end: f32,
) -> Interpolator {
    let host = Rc::clone(host);
    Interpolator::linear(label, clock.clone(), start, end, move |sample| {
        host.apply(axis, sample.value)
    })
}

fn handle_axis(
    clock: &FrameClock,
    host: &Rc<dyn PresentationHost>,
    config: &PanelConfig,
) -> Interpolator {
    host_axis(
        "handle opacity",
        clock,
        host,
        Axis::HandleOpacity,
        config.handle_opacity(),
        0.0,
    )
}

impl BottomPanel {
    /// Creates a collapsed panel showing `content`.
    ///
    /// Nothing is applied to the host until the first
    /// [`set_geometry`](Self::set_geometry).
    pub fn new(
        clock: FrameClock,
        host: Rc<dyn PresentationHost>,
        content: Rc<dyn PanelContent>,
        config: PanelConfig,
    ) -> Result<Self, PanelError> {
        config.validate()?;

        let state = PanelState {
            config,
            content,
            geometry: None,
            axes: None,
            corner_radius: host_axis(
                "corner radius",
                &clock,
                &host,
                Axis::CornerRadius,
                PanelStyle::CORNER_RADIUS,
                PanelStyle::EXPANDED_CORNER_RADIUS,
            ),
            handle_opacity: handle_axis(&clock, &host, &config),
            transition: None,
            position: PanelPosition::Collapsed,
            session: DragSession::new(),
            pan: PanGestureDetector::new(),
            height_constant: None,
            pending: None,
        };
        let shared = Rc::new_cyclic(|weak: &Weak<PanelShared>| {
            let scroller: Weak<dyn ScrollerDelegate> = weak.clone();
            PanelShared {
                weak_self: weak.clone(),
                clock,
                host,
                handoff: ScrollHandoff::new(scroller),
                state: RefCell::new(state),
                observers: RefCell::new(Observers::default()),
            }
        });
        shared.attach_content();
        log::debug!("bottom panel created with {config:?}");
        Ok(Self { shared })
    }

    /// Lays the panel out against new screen metrics.
    ///
    /// The first call builds the height and close axes and applies every
    /// value once. Later calls rebuild the height axis at the same progress.
    /// A deferred [`show`](Self::show) or [`hide`](Self::hide) runs now.
    pub fn set_geometry(&self, geometry: PanelGeometry) {
        self.shared.set_geometry(geometry);
    }

    pub fn geometry(&self) -> Option<PanelGeometry> {
        self.shared.state.borrow().geometry
    }

    pub fn config(&self) -> PanelConfig {
        self.shared.state.borrow().config
    }

    /// Feeds a raw pointer sample from a drag on the panel surface.
    pub fn on_pointer(&self, sample: PointerSample) {
        let events = self.shared.state.borrow_mut().pan.on_pointer(sample);
        for event in events {
            self.on_pan(event);
        }
    }

    /// Feeds a recognized pan on the panel surface.
    pub fn on_pan(&self, event: PanEvent) {
        self.shared.on_pan(event);
    }

    /// Slides the panel in from below the screen.
    ///
    /// Deferred until geometry is known; a later `show` or `hide` issued
    /// before that supersedes this one, whose completion gets `false`.
    pub fn show(&self, animated: bool, completion: Option<Completion>) {
        self.shared.set_visible(true, animated, completion);
    }

    /// Slides the panel off screen.
    pub fn hide(&self, animated: bool, completion: Option<Completion>) {
        self.shared.set_visible(false, animated, completion);
    }

    /// Swaps the hosted content and configuration.
    ///
    /// Running animations are cancelled and the panel returns to
    /// [`PanelPosition::Collapsed`] at once. If the container height differs
    /// from the new collapsed height, it animates there.
    pub fn replace(
        &self,
        content: Rc<dyn PanelContent>,
        config: PanelConfig,
    ) -> Result<(), PanelError> {
        self.shared.replace(content, config)
    }

    pub fn current_panel_position(&self) -> PanelPosition {
        self.shared.state.borrow().position
    }

    /// Progress of the height axis; 0 before geometry is known.
    pub fn height_progress(&self) -> f32 {
        self.shared
            .axes()
            .map_or(0.0, |axes| axes.height.progress())
    }

    /// Progress of the close axis: 0 fully shown, 1 off screen.
    pub fn close_progress(&self) -> f32 {
        self.shared.axes().map_or(0.0, |axes| axes.close.progress())
    }

    /// Last container height pushed to the host.
    pub fn height_constant(&self) -> Option<f32> {
        self.shared.state.borrow().height_constant
    }

    /// Mode of the drag in progress, if any.
    pub fn drag_mode(&self) -> Option<DragMode> {
        self.shared.state.borrow().session.mode()
    }

    pub fn is_animating(&self) -> bool {
        let transitioning = self.is_transitioning();
        transitioning
            || self
                .shared
                .axes()
                .is_some_and(|axes| axes.height.is_animating() || axes.close.is_animating())
    }

    /// Whether the post-replace height transition is running.
    pub fn is_transitioning(&self) -> bool {
        self.shared
            .state
            .borrow()
            .transition
            .as_ref()
            .is_some_and(Interpolator::is_animating)
    }

    pub fn scroll_ownership(&self) -> ScrollOwnership {
        self.shared.handoff.ownership()
    }

    pub fn is_scroll_handoff_attached(&self) -> bool {
        self.shared.handoff.is_attached()
    }

    /// Called when a drag dismissed the panel and its slide-out finished.
    pub fn set_on_closed_with_gesture(&self, callback: impl FnMut() + 'static) {
        self.shared.observers.borrow_mut().on_closed_with_gesture = Some(Box::new(callback));
    }

    /// Called whenever the height reaches a boundary state other than the
    /// last one.
    pub fn set_on_position_changed(&self, callback: impl FnMut(PanelPosition) + 'static) {
        self.shared.observers.borrow_mut().on_position_changed = Some(Box::new(callback));
    }
}

impl Drop for BottomPanel {
    fn drop(&mut self) {
        self.shared.cancel_animations();
        self.shared.handoff.detach();
        let pending = self.shared.state.borrow_mut().pending.take();
        if let Some(completion) = pending.and_then(|pending| pending.completion) {
            completion(false);
        }
    }
}

impl fmt::Debug for BottomPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("BottomPanel")
            .field("config", &state.config)
            .field("geometry", &state.geometry)
            .field("position", &state.position)
            .field("session", &state.session)
            .field("height_constant", &state.height_constant)
            .finish()
    }
}

impl PanelShared {
    fn axes(&self) -> Option<PanelAxes> {
        self.state.borrow().axes.clone()
    }

    fn attach_content(&self) {
        let (content, damping) = {
            let state = self.state.borrow();
            (Rc::clone(&state.content), state.config.allows_gestures())
        };
        self.handoff.set_damping(damping);
        match content.scroll_surface() {
            Some(surface) => self.handoff.attach(&surface),
            None => self.handoff.detach(),
        }
    }

    fn build_height(&self, metrics: &PanelMetrics) -> Interpolator {
        let weak = self.weak_self.clone();
        Interpolator::linear(
            "height",
            self.clock.clone(),
            metrics.collapsed_height,
            metrics.expanded_height,
            move |sample| {
                if let Some(panel) = weak.upgrade() {
                    panel.on_height_sample(sample);
                }
            },
        )
    }

    fn build_close(&self, panel_height: f32) -> Interpolator {
        let weak = self.weak_self.clone();
        Interpolator::linear("close", self.clock.clone(), 0.0, panel_height, move |sample| {
            if let Some(panel) = weak.upgrade() {
                panel.on_close_sample(sample);
            }
        })
    }

    fn on_height_sample(&self, sample: Sample) {
        self.host.apply(Axis::Height, sample.value);
        let (corner_radius, handle_opacity, changed) = {
            let mut state = self.state.borrow_mut();
            state.height_constant = Some(sample.value);
            let changed = match PanelPosition::from_progress(sample.progress) {
                Some(position) if position != state.position => {
                    state.position = position;
                    Some(position)
                }
                _ => None,
            };
            (
                state.corner_radius.clone(),
                state.handle_opacity.clone(),
                changed,
            )
        };
        corner_radius.set_progress(sample.progress);
        handle_opacity.set_progress(sample.progress);
        self.apply_dimming();
        if let Some(position) = changed {
            log::debug!("panel position -> {position:?}");
            self.notify_position_changed(position);
        }
    }

    fn on_close_sample(&self, sample: Sample) {
        self.host.apply(Axis::CloseTranslation, sample.value);
        self.apply_dimming();
    }

    fn on_transition_sample(&self, sample: Sample) {
        self.host.apply(Axis::Height, sample.value);
        self.state.borrow_mut().height_constant = Some(sample.value);
        self.apply_dimming();
    }

    fn apply_dimming(&self) {
        let opacity = {
            let state = self.state.borrow();
            let Some(axes) = state.axes.as_ref() else {
                return;
            };
            state
                .config
                .dimming_opacity(axes.height.progress(), axes.close.progress())
        };
        self.host.apply(Axis::DimmingOpacity, opacity);
    }

    fn set_geometry(&self, geometry: PanelGeometry) {
        let (config, previous) = {
            let state = self.state.borrow();
            if state.geometry == Some(geometry) {
                return;
            }
            (state.config, state.axes.clone())
        };
        let metrics = PanelMetrics::resolve(&config, &geometry);
        log::debug!(
            "geometry {}x{} -> heights {:.1}..{:.1}",
            geometry.screen_height(),
            geometry.safe_area_top(),
            metrics.collapsed_height,
            metrics.expanded_height
        );

        let height = self.build_height(&metrics);
        let (height_progress, height_target, close, first_layout) = match previous {
            Some(previous) => {
                let target = previous.height.animation_target();
                previous.height.stop_animation();
                (previous.height.progress(), target, previous.close, false)
            }
            None => {
                let close = self.build_close(PanelMetrics::panel_height(metrics.collapsed_height));
                (0.0, None, close, true)
            }
        };
        {
            let mut state = self.state.borrow_mut();
            state.geometry = Some(geometry);
            state.axes = Some(PanelAxes {
                metrics,
                height: height.clone(),
                close: close.clone(),
            });
        }

        height.set_progress(height_progress);
        if first_layout {
            close.set_progress(0.0);
        }
        if let Some(target) = height_target {
            height.animate_to(target, snap_spec(), None);
        }

        let pending = self.state.borrow_mut().pending.take();
        if let Some(pending) = pending {
            self.set_visible(pending.visible, pending.animated, pending.completion);
        }
    }

    /// Rebuilds the close axis when the panel height changed since it was
    /// built. Only done while the close axis rests at 0.
    fn ensure_close_span(&self) {
        let (axes, height_constant) = {
            let state = self.state.borrow();
            match (state.axes.clone(), state.height_constant) {
                (Some(axes), Some(height_constant)) => (axes, height_constant),
                _ => return,
            }
        };
        if axes.close.is_animating() || axes.close.progress() != 0.0 {
            return;
        }
        let panel_height = PanelMetrics::panel_height(height_constant);
        if (axes.close.end_value() - panel_height).abs() < HEIGHT_EPSILON {
            return;
        }
        log::debug!("rebuilding close axis for panel height {panel_height:.1}");
        let close = self.build_close(panel_height);
        if let Some(axes) = self.state.borrow_mut().axes.as_mut() {
            axes.close = close;
        }
    }

    fn set_visible(&self, visible: bool, animated: bool, completion: Option<Completion>) {
        if self.state.borrow().axes.is_none() {
            log::debug!(
                "deferring {} until geometry is known",
                if visible { "show" } else { "hide" }
            );
            let superseded = self.state.borrow_mut().pending.replace(PendingVisibility {
                visible,
                animated,
                completion,
            });
            if let Some(completion) = superseded.and_then(|pending| pending.completion) {
                completion(false);
            }
            return;
        }

        self.ensure_close_span();
        let Some(axes) = self.axes() else {
            return;
        };
        let spec = visibility_spec(animated);
        if visible {
            axes.close.set_progress(1.0);
            axes.close.animate_to(0.0, spec, completion);
        } else {
            axes.close.animate_to(1.0, spec, completion);
        }
    }

    fn replace(
        &self,
        content: Rc<dyn PanelContent>,
        config: PanelConfig,
    ) -> Result<(), PanelError> {
        config.validate()?;
        self.cancel_animations();

        let handle_opacity = handle_axis(&self.clock, &self.host, &config);
        let (geometry, height_constant, corner_radius, position_changed) = {
            let mut state = self.state.borrow_mut();
            state.config = config;
            state.content = content;
            state.session = DragSession::new();
            state.handle_opacity = handle_opacity.clone();
            let position_changed = state.position != PanelPosition::Collapsed;
            state.position = PanelPosition::Collapsed;
            (
                state.geometry,
                state.height_constant,
                state.corner_radius.clone(),
                position_changed,
            )
        };
        self.attach_content();
        log::debug!("content replaced with {config:?}");
        if position_changed {
            self.notify_position_changed(PanelPosition::Collapsed);
        }

        let Some(geometry) = geometry else {
            return Ok(());
        };
        let metrics = PanelMetrics::resolve(&config, &geometry);
        let height = self.build_height(&metrics);
        if let Some(axes) = self.state.borrow_mut().axes.as_mut() {
            axes.metrics = metrics;
            axes.height = height;
        }
        corner_radius.set_progress(0.0);
        handle_opacity.set_progress(0.0);
        self.apply_dimming();

        if let Some(from) = height_constant {
            if (from - metrics.collapsed_height).abs() >= HEIGHT_EPSILON {
                self.start_transition(from, metrics.collapsed_height);
            }
        }
        Ok(())
    }

    fn start_transition(&self, from: f32, to: f32) {
        log::debug!("content transition {from:.1} -> {to:.1}");
        let weak = self.weak_self.clone();
        let transition = Interpolator::linear(
            "content transition",
            self.clock.clone(),
            from,
            to,
            move |sample| {
                if let Some(panel) = weak.upgrade() {
                    panel.on_transition_sample(sample);
                }
            },
        );
        let previous = self.state.borrow_mut().transition.replace(transition.clone());
        if let Some(previous) = previous {
            previous.stop_animation();
        }

        let weak = self.weak_self.clone();
        transition.animate_to(
            1.0,
            snap_spec(),
            Some(Box::new(move |finished| {
                if finished {
                    if let Some(panel) = weak.upgrade() {
                        panel.state.borrow_mut().transition = None;
                    }
                }
            })),
        );
    }

    fn cancel_animations(&self) {
        let (axes, transition) = {
            let mut state = self.state.borrow_mut();
            (state.axes.clone(), state.transition.take())
        };
        if let Some(transition) = transition {
            transition.stop_animation();
        }
        if let Some(axes) = axes {
            axes.height.stop_animation();
            axes.close.stop_animation();
        }
    }

    fn on_pan(&self, event: PanEvent) {
        if !self.state.borrow().config.allows_gestures() {
            log::trace!("pan ignored: panel gestures disabled");
            return;
        }
        match event {
            PanEvent::Began => self.begin_session(),
            PanEvent::Changed { movement } => {
                self.translate(movement);
            }
            PanEvent::Ended { velocity } => {
                self.release(velocity);
                self.end_session();
            }
        }
    }

    /// Starts a drag on the panel itself: running snaps and the content
    /// transition stop where they are so the finger takes over from there.
    fn begin_session(&self) {
        self.reset_session();
        self.take_over_animations();
    }

    /// Starts a drag whose movement may never reach the panel. Animations
    /// keep running until the first movement is consumed.
    fn reset_session(&self) {
        self.state.borrow_mut().session = DragSession::new();
        self.ensure_close_span();
    }

    fn take_over_animations(&self) {
        let (axes, transition) = {
            let mut state = self.state.borrow_mut();
            (state.axes.clone(), state.transition.take())
        };
        if let Some(transition) = transition {
            transition.stop_animation();
        }
        if let Some(axes) = axes {
            axes.height.stop_animation();
        }
    }

    fn translate(&self, movement: f32) -> Handoff {
        let (translator, mut session, axes) = {
            let state = self.state.borrow();
            let Some(axes) = state.axes.clone() else {
                log::trace!("movement {movement:.2} declined before geometry is known");
                return Handoff::Declined;
            };
            (GestureTranslator::new(&state.config), state.session, axes)
        };
        let first_take = session.consumed() == 0.0;
        let handoff = translator.translate(&mut session, &axes, movement);
        self.state.borrow_mut().session = session;
        if first_take && handoff.is_consumed() {
            self.take_over_animations();
        }
        handoff
    }

    /// Settles the axes after the finger lifted with `velocity`.
    fn release(&self, velocity: f32) -> Deceleration {
        let (config, session, position, axes) = {
            let state = self.state.borrow();
            let Some(axes) = state.axes.clone() else {
                return Deceleration::Allow;
            };
            (state.config, state.session, state.position, axes)
        };
        let height = axes.height.progress();
        let close = axes.close.progress();
        let close_settled = close == 0.0 || axes.close.is_animating();
        let height_settled = height == 0.0 || height == 1.0 || axes.height.is_animating();
        if session.mode().is_none() && close_settled && height_settled {
            return Deceleration::Allow;
        }
        let closing = session.is_closing() || !close_settled;

        let resolver = SnapResolver::new();
        if closing {
            let decision = resolver.resolve_closing(close, velocity);
            self.snap_close(&axes.close, decision);
            Deceleration::Suppress
        } else {
            if config.is_expandable {
                let decision = resolver.resolve_resizing(position, height, velocity);
                axes.height
                    .animate_to(decision.target_progress(), snap_spec(), None);
            }
            Deceleration::Allow
        }
    }

    fn snap_close(&self, close: &Interpolator, decision: SnapDecision) {
        let on_complete: Option<Completion> = match decision {
            SnapDecision::Dismiss => {
                let weak = self.weak_self.clone();
                Some(Box::new(move |finished| {
                    if finished {
                        if let Some(panel) = weak.upgrade() {
                            panel.notify_closed_with_gesture();
                        }
                    }
                }))
            }
            _ => None,
        };
        close.animate_to(decision.target_progress(), snap_spec(), on_complete);
    }

    fn end_session(&self) {
        self.state.borrow_mut().session = DragSession::new();
        self.settle_if_stranded();
    }

    /// A drag can end without a release reaching the panel, e.g. when the
    /// content scrolled away from its boundary after a handoff was stopped.
    /// Axes left between states go to the nearest one.
    fn settle_if_stranded(&self) {
        let (position, axes) = {
            let state = self.state.borrow();
            let Some(axes) = state.axes.clone() else {
                return;
            };
            (state.position, axes)
        };
        let resolver = SnapResolver::new();

        let close = axes.close.progress();
        if close > 0.0 && close < 1.0 && !axes.close.is_animating() {
            self.snap_close(&axes.close, resolver.resolve_closing(close, 0.0));
        }
        let height = axes.height.progress();
        if height > 0.0 && height < 1.0 && !axes.height.is_animating() {
            let decision = resolver.resolve_resizing(position, height, 0.0);
            axes.height
                .animate_to(decision.target_progress(), snap_spec(), None);
        }
    }

    fn notify_position_changed(&self, position: PanelPosition) {
        let callback = self.observers.borrow_mut().on_position_changed.take();
        if let Some(mut callback) = callback {
            callback(position);
            let mut observers = self.observers.borrow_mut();
            if observers.on_position_changed.is_none() {
                observers.on_position_changed = Some(callback);
            }
        }
    }

    fn notify_closed_with_gesture(&self) {
        log::debug!("panel closed by gesture");
        let callback = self.observers.borrow_mut().on_closed_with_gesture.take();
        if let Some(mut callback) = callback {
            callback();
            let mut observers = self.observers.borrow_mut();
            if observers.on_closed_with_gesture.is_none() {
                observers.on_closed_with_gesture = Some(callback);
            }
        }
    }
}

impl ScrollerDelegate for PanelShared {
    fn scroller_will_begin_dragging(&self) {
        if self.state.borrow().config.allows_gestures() {
            self.reset_session();
        }
    }

    fn scroller_did_scroll(&self, movement: f32) -> Handoff {
        self.translate(movement)
    }

    fn scroller_will_end_dragging(&self, velocity: f32) -> Deceleration {
        self.release(velocity)
    }

    fn scroller_did_end_dragging(&self) {
        self.end_session();
    }
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
