use crate::config::CounterConfig;

/// Leading-integer parse of a `data-target` attribute: optional whitespace,
/// optional sign, then digits; trailing junk is ignored. Anything else is NaN,
/// which then flows through the animation unguarded.
pub fn parse_target(raw: &str) -> f64 {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<f64>() {
        Ok(v) if end > 0 => sign * v,
        _ => f64::NAN,
    }
}

/// Render a counter value the way the page shows numbers.
pub fn display(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CounterFrame {
    /// Show this text and request another frame.
    Show(String),
    /// Show this text and stop.
    Finish(String),
}

/// Count-up animation for one statistic.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    frame: u32,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: f64, cfg: &CounterConfig) -> Self {
        Self {
            target,
            increment: target / (cfg.duration_ms / cfg.frame_ms),
            frame: 0,
            done: false,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Progress is `frame * increment` rather than a running sum so the last
    /// frame lands on the target without drift.
    pub fn next_frame(&mut self) -> CounterFrame {
        if self.done {
            return CounterFrame::Finish(display(self.target));
        }
        self.frame += 1;
        let current = f64::from(self.frame) * self.increment;
        if current < self.target {
            CounterFrame::Show(display(current.floor()))
        } else {
            self.done = true;
            CounterFrame::Finish(display(self.target))
        }
    }
}
