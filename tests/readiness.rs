use std::cell::Cell;
use std::rc::Rc;

use portfolio_fx::readiness::{
    CancelToken, Capability, PollPolicy, PollStep, Readiness, ReadinessPoller,
};

fn counter(readiness: &Readiness, capability: Capability) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    readiness.on_ready(capability, move || h.set(h.get() + 1));
    hits
}

#[test]
fn on_ready_fires_once_when_capability_appears() {
    let readiness = Readiness::new();
    let hits = counter(&readiness, Capability::Timeline);
    let mut poller = ReadinessPoller::new(
        Capability::Timeline,
        PollPolicy {
            interval_ms: 100,
            max_attempts: None,
        },
        readiness.clone(),
        CancelToken::new(),
    );

    // Library shows up on the 5th check.
    for _ in 0..4 {
        assert_eq!(poller.step(false), PollStep::RetryIn(100));
        assert_eq!(hits.get(), 0, "fired before the capability existed");
    }
    assert_eq!(poller.step(true), PollStep::Ready);
    assert_eq!(hits.get(), 1);
    assert!(readiness.is_ready(Capability::Timeline));

    // A driver that keeps going (or a second poller) never fires it again.
    for _ in 0..1000 {
        poller.step(true);
    }
    readiness.mark_ready(Capability::Timeline);
    assert_eq!(hits.get(), 1);
}

#[test]
fn late_subscribers_run_immediately() {
    let readiness = Readiness::new();
    assert!(readiness.mark_ready(Capability::Graphics));
    assert!(!readiness.mark_ready(Capability::Graphics));
    let hits = counter(&readiness, Capability::Graphics);
    assert_eq!(hits.get(), 1);
}

#[test]
fn pollers_converge_independently() {
    let readiness = Readiness::new();
    let timeline_hits = counter(&readiness, Capability::Timeline);
    let graphics_hits = counter(&readiness, Capability::Graphics);
    let cancel = CancelToken::new();
    let mut timeline = ReadinessPoller::new(
        Capability::Timeline,
        PollPolicy::default(),
        readiness.clone(),
        cancel.clone(),
    );
    let mut graphics = ReadinessPoller::new(
        Capability::Graphics,
        PollPolicy::default(),
        readiness.clone(),
        cancel,
    );

    assert_eq!(graphics.step(false), PollStep::RetryIn(100));
    assert_eq!(timeline.step(true), PollStep::Ready);
    assert_eq!((timeline_hits.get(), graphics_hits.get()), (1, 0));
    assert_eq!(graphics.step(true), PollStep::Ready);
    assert_eq!((timeline_hits.get(), graphics_hits.get()), (1, 1));
}

#[test]
fn gives_up_after_attempt_budget() {
    let readiness = Readiness::new();
    let hits = counter(&readiness, Capability::Graphics);
    let mut poller = ReadinessPoller::new(
        Capability::Graphics,
        PollPolicy {
            interval_ms: 50,
            max_attempts: Some(3),
        },
        readiness.clone(),
        CancelToken::new(),
    );
    assert_eq!(poller.step(false), PollStep::RetryIn(50));
    assert_eq!(poller.step(false), PollStep::RetryIn(50));
    assert_eq!(poller.step(false), PollStep::GaveUp);
    // Appearing after the budget is spent does not revive the feature.
    assert_eq!(poller.step(true), PollStep::GaveUp);
    assert_eq!(hits.get(), 0);
    assert!(!readiness.is_ready(Capability::Graphics));
}

#[test]
fn teardown_cancels_pending_poll() {
    let readiness = Readiness::new();
    let hits = counter(&readiness, Capability::Timeline);
    let cancel = CancelToken::new();
    let mut poller = ReadinessPoller::new(
        Capability::Timeline,
        PollPolicy::default(),
        readiness.clone(),
        cancel.clone(),
    );
    assert_eq!(poller.step(false), PollStep::RetryIn(100));
    cancel.cancel();
    assert_eq!(poller.step(true), PollStep::Cancelled);
    assert_eq!(hits.get(), 0);
}

#[test]
fn global_names() {
    assert_eq!(Capability::Timeline.global_name(), "gsap");
    assert_eq!(Capability::Graphics.global_name(), "THREE");
}
