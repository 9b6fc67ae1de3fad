//! Tween descriptions handed to the animation library, and the hero
//! entrance cascade.

use serde::Serialize;

/// Easing curves used by the page, named the way GSAP parses them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum Ease {
    Power2Out,
    Power3Out,
    /// Overshooting ease-out with the given overshoot amount.
    BackOut(f64),
}

impl Ease {
    pub fn gsap_name(self) -> String {
        match self {
            Self::Power2Out => "power2.out".to_string(),
            Self::Power3Out => "power3.out".to_string(),
            Self::BackOut(s) => format!("back.out({s})"),
        }
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.gsap_name()
    }
}

/// Vars object for a `from`/`to` tween. `x`, `y`, `scale` and `opacity`
/// are the offset state for `from` tweens and the end state for `to` tweens.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TweenVars {
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
    pub ease: Ease,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub paused: bool,
}

impl TweenVars {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            duration,
            x: None,
            y: None,
            scale: None,
            opacity: None,
            stagger: None,
            ease,
            paused: false,
        }
    }

    /// Shorthand for the common "fade in from transparent" start state.
    pub fn reveal(duration: f64, ease: Ease) -> Self {
        Self::new(duration, ease).opacity(0.0)
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    /// Wall time of the tween over `count` targets, stagger included.
    pub fn total_duration(&self, count: usize) -> f64 {
        let extra = count.saturating_sub(1) as f64;
        self.duration + self.stagger.unwrap_or(0.0) * extra
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Where a step is inserted relative to the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Append at the current end.
    End,
    /// `"-=d"`: start `d` seconds before the current end.
    Overlap(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    pub targets: &'static str,
    pub vars: TweenVars,
    pub position: Position,
}

/// Hero intro: each group fades in from an offset, later groups starting
/// before earlier ones finish.
pub fn entrance_timeline() -> Vec<TimelineStep> {
    let step = |targets, vars, position| TimelineStep {
        targets,
        vars,
        position,
    };
    vec![
        step(
            ".greeting",
            TweenVars::reveal(1.0, Ease::Power3Out).y(50.0),
            Position::End,
        ),
        step(
            ".name",
            TweenVars::reveal(1.2, Ease::Power3Out).y(100.0),
            Position::Overlap(0.5),
        ),
        step(
            ".title",
            TweenVars::reveal(1.0, Ease::Power3Out).y(50.0),
            Position::Overlap(0.8),
        ),
        step(
            ".hero-description",
            TweenVars::reveal(1.0, Ease::Power3Out).y(30.0),
            Position::Overlap(0.6),
        ),
        step(
            ".hero-buttons",
            TweenVars::reveal(1.0, Ease::Power3Out).y(30.0),
            Position::Overlap(0.4),
        ),
        step(
            ".floating-elements .element",
            TweenVars::reveal(1.5, Ease::BackOut(1.7))
                .scale(0.0)
                .stagger(0.2),
            Position::Overlap(0.8),
        ),
    ]
}

/// Resolve relative positions to absolute start times (seconds). `count`
/// reports how many elements each step's selector matches, which stretches
/// staggered steps.
pub fn layout(steps: &[TimelineStep], count: impl Fn(&str) -> usize) -> Vec<f64> {
    let mut end: f64 = 0.0;
    steps
        .iter()
        .map(|step| {
            let start = match step.position {
                Position::End => end,
                Position::Overlap(d) => (end - d).max(0.0),
            };
            end = end.max(start + step.vars.total_duration(count(step.targets)));
            start
        })
        .collect()
}
