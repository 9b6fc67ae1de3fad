//! Scroll-driven play/reverse of reveal tweens.
//!
//! A trigger has a start line and an end line, each pairing an edge of the
//! watched section with a fraction of the viewport height ("top 80%" means
//! the section's top reaches 80% of the way down the viewport). Those two
//! lines split the scroll range into three regions; every region change
//! fires one or two of the four callbacks (enter, leave, enter-back,
//! leave-back), and each callback maps to a [`ToggleAction`] on the tween.

use crate::timeline::{Ease, TweenVars};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerLine {
    pub edge: Edge,
    /// 0.0 is the top of the viewport, 1.0 the bottom.
    pub viewport_fraction: f64,
}

impl TriggerLine {
    pub const fn new(edge: Edge, viewport_fraction: f64) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Whether the section edge has scrolled up to (or past) the line.
    pub fn crossed(&self, bounds: Bounds, viewport_height: f64) -> bool {
        let edge = match self.edge {
            Edge::Top => bounds.top,
            Edge::Bottom => bounds.bottom,
        };
        edge <= self.viewport_fraction * viewport_height
    }
}

/// Section bounds relative to the viewport, as `getBoundingClientRect` reports them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    None,
    Play,
    Reverse,
    Restart,
    Reset,
    Pause,
    Resume,
    Complete,
}

/// Actions for enter, leave, enter-back and leave-back, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// `"play none none reverse"`: reveal on the way down, undo when the
    /// section drops back below the start line.
    ///
    /// Crossing the end line (bottom at 20%) in either direction fires
    /// `leave`/`enter-back`, which are no-ops here, so a section scrolled
    /// past its end stays revealed.
    pub const PLAY_REVERSE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    pub fn for_event(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Start line not reached yet.
    Before,
    /// Between the start and end lines.
    Active,
    /// End line passed.
    After,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerConfig {
    pub start: TriggerLine,
    pub end: TriggerLine,
    pub actions: ToggleActions,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            start: TriggerLine::new(Edge::Top, 0.8),
            end: TriggerLine::new(Edge::Bottom, 0.2),
            actions: ToggleActions::PLAY_REVERSE,
        }
    }
}

impl TriggerConfig {
    pub fn region(&self, bounds: Bounds, viewport_height: f64) -> Region {
        if !self.start.crossed(bounds, viewport_height) {
            Region::Before
        } else if self.end.crossed(bounds, viewport_height) {
            Region::After
        } else {
            Region::Active
        }
    }
}

/// The tween side of a trigger. Implemented by GSAP tweens in the browser.
pub trait Playback {
    fn play(&self);
    fn reverse(&self);
    fn restart(&self);
    fn pause(&self);
    fn resume(&self);
    /// Jump to the start and hold.
    fn reset(&self);
    /// Jump to the end.
    fn complete(&self);
}

pub fn apply<P: Playback + ?Sized>(action: ToggleAction, playback: &P) {
    match action {
        ToggleAction::None => {}
        ToggleAction::Play => playback.play(),
        ToggleAction::Reverse => playback.reverse(),
        ToggleAction::Restart => playback.restart(),
        ToggleAction::Reset => playback.reset(),
        ToggleAction::Pause => playback.pause(),
        ToggleAction::Resume => playback.resume(),
        ToggleAction::Complete => playback.complete(),
    }
}

/// Callbacks fired when moving between regions. Jumping over the active
/// region fires both of the crossings in between, in scroll order.
pub fn transition(from: Region, to: Region) -> &'static [TriggerEvent] {
    use Region::*;
    use TriggerEvent::*;
    match (from, to) {
        (Before, Active) => &[Enter],
        (Before, After) => &[Enter, Leave],
        (Active, After) => &[Leave],
        (Active, Before) => &[LeaveBack],
        (After, Active) => &[EnterBack],
        (After, Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

/// Per-section trigger state. Starts in [`Region::Before`], so the first
/// update on an already-scrolled page fires `Enter` like a fresh scroll would.
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    config: TriggerConfig,
    region: Region,
}

impl ScrollTrigger {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            region: Region::Before,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Feed the section's current bounds; applies the resulting actions to
    /// `playback` and returns the callbacks that fired.
    pub fn update<P: Playback + ?Sized>(
        &mut self,
        bounds: Bounds,
        viewport_height: f64,
        playback: &P,
    ) -> &'static [TriggerEvent] {
        let next = self.config.region(bounds, viewport_height);
        let events = transition(self.region, next);
        self.region = next;
        for &event in events {
            apply(self.config.actions.for_event(event), playback);
        }
        events
    }
}

/// One scroll-bound reveal: `targets` animate from `vars` while `trigger`
/// drives playback.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollReveal {
    pub targets: &'static str,
    pub trigger: &'static str,
    pub vars: TweenVars,
    pub config: TriggerConfig,
}

pub fn scroll_reveals() -> Vec<ScrollReveal> {
    let reveal = |targets, trigger, vars| ScrollReveal {
        targets,
        trigger,
        vars,
        config: TriggerConfig::default(),
    };
    vec![
        reveal(
            ".about-card",
            ".about",
            TweenVars::reveal(1.0, Ease::Power3Out).y(50.0).stagger(0.2),
        ),
        reveal(
            ".stat-item",
            ".about-stats",
            TweenVars::reveal(1.0, Ease::BackOut(1.7))
                .scale(0.8)
                .stagger(0.2),
        ),
        reveal(
            ".skill-category",
            ".skills",
            TweenVars::reveal(1.0, Ease::Power3Out).y(50.0).stagger(0.3),
        ),
        reveal(
            ".skill-item",
            ".skill-items",
            TweenVars::reveal(0.8, Ease::BackOut(1.7))
                .scale(0.0)
                .stagger(0.1),
        ),
        reveal(
            ".project-card",
            ".projects",
            TweenVars::reveal(1.0, Ease::Power3Out).y(100.0).stagger(0.3),
        ),
        reveal(
            ".contact-item",
            ".contact-info",
            TweenVars::reveal(1.0, Ease::Power3Out).x(-50.0).stagger(0.2),
        ),
        reveal(
            ".contact-form",
            ".contact-form",
            TweenVars::reveal(1.0, Ease::Power3Out).x(50.0),
        ),
    ]
}
