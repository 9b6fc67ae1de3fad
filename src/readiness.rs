//! Library-readiness gate.
//!
//! The optional third-party libraries (GSAP and three.js) are loaded by
//! plain `<script>` tags that may finish after the wasm module starts. Each
//! one gets a [`ReadinessPoller`] that checks for its global at a fixed
//! interval; the first successful check flips the capability in the shared
//! [`Readiness`] object, which in turn runs every setup routine subscribed
//! through [`Readiness::on_ready`]. Flags are write-once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Animation timeline library (`gsap`).
    Timeline,
    /// 3D graphics library (`THREE`).
    Graphics,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Timeline, Capability::Graphics];

    /// Name of the global the library installs on `window`.
    pub fn global_name(self) -> &'static str {
        match self {
            Self::Timeline => "gsap",
            Self::Graphics => "THREE",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Timeline => 0,
            Self::Graphics => 1,
        }
    }
}

type Listener = Box<dyn FnOnce()>;

/// Set-once capability flags plus the callbacks waiting on them.
#[derive(Default)]
pub struct Readiness {
    flags: [Cell<bool>; 2],
    listeners: RefCell<Vec<(Capability, Listener)>>,
}

impl Readiness {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn is_ready(&self, capability: Capability) -> bool {
        self.flags[capability.index()].get()
    }

    /// Run `f` once `capability` is ready; immediately if it already is.
    pub fn on_ready(&self, capability: Capability, f: impl FnOnce() + 'static) {
        if self.is_ready(capability) {
            f();
        } else {
            self.listeners.borrow_mut().push((capability, Box::new(f)));
        }
    }

    /// Flip the flag for `capability`. Returns `false` if it was already set,
    /// in which case no listener runs.
    pub fn mark_ready(&self, capability: Capability) -> bool {
        if self.flags[capability.index()].replace(true) {
            return false;
        }
        // Listeners run with the borrow released so they may subscribe again.
        let fire: Vec<Listener> = {
            let mut listeners = self.listeners.borrow_mut();
            let (fire, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut *listeners)
                .into_iter()
                .partition(|(c, _)| *c == capability);
            *listeners = keep;
            fire.into_iter().map(|(_, f)| f).collect()
        };
        log::info!("{} ready", capability.global_name());
        for f in fire {
            f();
        }
        true
    }
}

/// Retry schedule for a poller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    pub interval_ms: u32,
    /// `None` polls for the lifetime of the page.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            max_attempts: Some(600),
        }
    }
}

/// Shared abort switch, flipped on page teardown.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What the driver should do after a poll attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStep {
    Ready,
    RetryIn(u32),
    GaveUp,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PollState {
    Polling,
    Ready,
    GaveUp,
    Cancelled,
}

pub struct ReadinessPoller {
    capability: Capability,
    policy: PollPolicy,
    readiness: Rc<Readiness>,
    cancel: CancelToken,
    attempts: u32,
    state: PollState,
}

impl ReadinessPoller {
    pub fn new(
        capability: Capability,
        policy: PollPolicy,
        readiness: Rc<Readiness>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            capability,
            policy,
            readiness,
            cancel,
            attempts: 0,
            state: PollState::Polling,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record one check result. Once a terminal step has been returned every
    /// later call returns it again without touching the readiness flags.
    pub fn step(&mut self, present: bool) -> PollStep {
        match self.state {
            PollState::Ready => return PollStep::Ready,
            PollState::GaveUp => return PollStep::GaveUp,
            PollState::Cancelled => return PollStep::Cancelled,
            PollState::Polling => {}
        }
        if self.cancel.is_cancelled() {
            self.state = PollState::Cancelled;
            log::debug!("{} poll cancelled", self.capability.global_name());
            return PollStep::Cancelled;
        }

        self.attempts += 1;
        if present {
            self.state = PollState::Ready;
            self.readiness.mark_ready(self.capability);
            return PollStep::Ready;
        }
        match self.policy.max_attempts {
            Some(max) if self.attempts >= max => {
                self.state = PollState::GaveUp;
                log::warn!(
                    "{} not available after {} attempts, feature disabled",
                    self.capability.global_name(),
                    self.attempts
                );
                PollStep::GaveUp
            }
            _ => PollStep::RetryIn(self.policy.interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poller(policy: PollPolicy) -> (ReadinessPoller, Rc<Readiness>, CancelToken) {
        let readiness = Readiness::new();
        let cancel = CancelToken::new();
        let p = ReadinessPoller::new(Capability::Timeline, policy, readiness.clone(), cancel.clone());
        (p, readiness, cancel)
    }

    #[test]
    fn retries_at_fixed_interval() {
        let (mut p, readiness, _) = poller(PollPolicy::default());
        assert_eq!(p.step(false), PollStep::RetryIn(100));
        assert_eq!(p.step(false), PollStep::RetryIn(100));
        assert!(!readiness.is_ready(Capability::Timeline));
        assert_eq!(p.attempts(), 2);
    }

    #[test]
    fn terminal_steps_are_sticky() {
        let (mut p, _, _) = poller(PollPolicy::default());
        assert_eq!(p.step(true), PollStep::Ready);
        assert_eq!(p.step(false), PollStep::Ready);
        assert_eq!(p.attempts(), 1);
    }

    #[test]
    fn cancelled_before_ready_never_flips_flag() {
        let (mut p, readiness, cancel) = poller(PollPolicy::default());
        assert_eq!(p.step(false), PollStep::RetryIn(100));
        cancel.cancel();
        assert_eq!(p.step(true), PollStep::Cancelled);
        assert!(!readiness.is_ready(Capability::Timeline));
    }

    #[test]
    fn listeners_for_other_capability_stay_queued() {
        let readiness = Readiness::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        readiness.on_ready(Capability::Graphics, move || h.set(h.get() + 1));
        readiness.mark_ready(Capability::Timeline);
        assert_eq!(hits.get(), 0);
        readiness.mark_ready(Capability::Graphics);
        assert_eq!(hits.get(), 1);
    }
}
