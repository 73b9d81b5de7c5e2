use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callbacks_run_once_with_frame_time() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    let seen = Rc::new(Cell::new(None));
    let seen_in_callback = Rc::clone(&seen);

    let _registration = clock.with_frame_nanos(move |time| seen_in_callback.set(Some(time)));
    assert!(runtime.needs_frame());

    runtime.handle().drain_frame_callbacks(42);
    assert_eq!(seen.get(), Some(42));
    assert!(!runtime.needs_frame());

    seen.set(None);
    runtime.handle().drain_frame_callbacks(84);
    assert_eq!(seen.get(), None, "callbacks are one-shot");
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::default();
    let fired = Rc::new(Cell::new(false));
    let fired_in_callback = Rc::clone(&fired);

    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_in_callback.set(true));
    drop(registration);

    runtime.handle().drain_frame_callbacks(16);
    assert!(!fired.get());
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = Runtime::default();
    let clock = runtime.frame_clock();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let keep_alive = Rc::new(RefCell::new(Vec::new()));

    {
        let frames = Rc::clone(&frames);
        let clock_inner = clock.clone();
        let keep_alive_inner = Rc::clone(&keep_alive);
        let registration = clock.with_frame_nanos(move |time| {
            frames.borrow_mut().push(time);
            let frames = Rc::clone(&frames);
            let next = clock_inner.with_frame_nanos(move |time| frames.borrow_mut().push(time));
            keep_alive_inner.borrow_mut().push(next);
        });
        keep_alive.borrow_mut().push(registration);
    }

    runtime.handle().drain_frame_callbacks(10);
    assert_eq!(frames.borrow().as_slice(), &[10]);
    assert!(runtime.needs_frame());

    runtime.handle().drain_frame_callbacks(20);
    assert_eq!(frames.borrow().as_slice(), &[10, 20]);
}

#[test]
fn scheduler_is_asked_once_per_pending_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let clock = runtime.frame_clock();

    let _a = clock.with_frame_nanos(|_| {});
    let _b = clock.with_frame_nanos(|_| {});
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 1);

    runtime.handle().drain_frame_callbacks(0);
    let _c = clock.with_frame_nanos(|_| {});
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    handle.drain_frame_callbacks(0);
}
