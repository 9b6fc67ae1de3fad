//! Tunables for every effect. Defaults reproduce the stock page; a page may
//! override any subset through a JSON block (`<script id="fx-config">`).

use serde::Deserialize;

use crate::error::{FxError, FxResult};
use crate::readiness::PollPolicy;

/// Element id of the optional JSON override block.
pub const CONFIG_ELEMENT_ID: &str = "fx-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub poll: PollPolicy,
    pub background: BackgroundConfig,
    pub counter: CounterConfig,
    /// Scroll offset (px) past which the navbar switches to its solid style.
    pub navbar_scroll_threshold: f64,
    pub typing: TypingConfig,
    /// Number of decorative DOM particles.
    pub dom_particles: usize,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            poll: PollPolicy::default(),
            background: BackgroundConfig::default(),
            counter: CounterConfig::default(),
            navbar_scroll_threshold: 100.0,
            typing: TypingConfig::default(),
            dom_particles: 50,
        }
    }
}

impl FxConfig {
    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> FxResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the effects cannot run with.
    pub fn validate(&self) -> FxResult<()> {
        if self.poll.interval_ms == 0 {
            return Err(FxError::config("poll.interval_ms must be positive"));
        }
        if !self.navbar_scroll_threshold.is_finite() {
            return Err(FxError::config("navbar_scroll_threshold must be finite"));
        }
        self.background.validate()?;
        self.counter.validate()
    }
}

fn positive(name: &str, value: f64) -> FxResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FxError::config(format!("{name} must be a positive number, got {value}")))
    }
}

fn fraction(name: &str, value: f64) -> FxResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FxError::config(format!("{name} must be within 0..=1, got {value}")))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub canvas_id: String,
    pub particle_count: usize,
    /// Side length of the cube the particles are scattered in, centered at the origin.
    pub extent: f32,
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub camera_z: f64,
    pub point_size: f64,
    pub opacity: f64,
    /// Per-frame rotation increments (radians).
    pub spin_x: f64,
    pub spin_y: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            canvas_id: "hero-canvas".to_string(),
            particle_count: 1000,
            extent: 20.0,
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 5.0,
            point_size: 0.05,
            opacity: 0.8,
            spin_x: 0.001,
            spin_y: 0.002,
        }
    }
}

impl BackgroundConfig {
    pub fn validate(&self) -> FxResult<()> {
        positive("background.extent", f64::from(self.extent))?;
        if self
            .particle_count
            .checked_mul(3)
            .and_then(|n| u32::try_from(n).ok())
            .is_none()
        {
            return Err(FxError::config(format!(
                "background.particle_count {} is too large",
                self.particle_count
            )));
        }
        positive("background.fov_deg", self.fov_deg)?;
        positive("background.near", self.near)?;
        positive("background.far", self.far)?;
        if self.far <= self.near {
            return Err(FxError::config("background.far must exceed background.near"));
        }
        positive("background.point_size", self.point_size)?;
        fraction("background.opacity", self.opacity)?;
        for (name, v) in [
            ("background.camera_z", self.camera_z),
            ("background.spin_x", self.spin_x),
            ("background.spin_y", self.spin_y),
        ] {
            if !v.is_finite() {
                return Err(FxError::config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: f64,
    pub frame_ms: f64,
    /// Fraction of the element that must be visible before counting starts.
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            frame_ms: 16.0,
            threshold: 0.5,
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> FxResult<()> {
        positive("counter.duration_ms", self.duration_ms)?;
        positive("counter.frame_ms", self.frame_ms)?;
        fraction("counter.threshold", self.threshold)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub start_delay_ms: i32,
    pub char_delay_ms: i32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 2000,
            char_delay_ms: 100,
        }
    }
}
