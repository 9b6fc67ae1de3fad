use rand::Rng;

/// Point cloud for the graphics background, packed the way buffer
/// attributes want it: `[x0, y0, z0, x1, ...]` and `[r0, g0, b0, r1, ...]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl ParticleField {
    /// Scatter `count` points uniformly in a cube of side `extent` centered
    /// at the origin. Color channels are drawn from the bright half, [0.5, 1).
    ///
    /// Panics unless `extent` is positive and finite; configs go through
    /// [`BackgroundConfig::validate`](crate::config::BackgroundConfig::validate) first.
    pub fn generate<R: Rng + ?Sized>(count: usize, extent: f32, rng: &mut R) -> Self {
        let half = extent / 2.0;
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        for _ in 0..count {
            for _ in 0..3 {
                positions.push(rng.gen_range(-half..half));
                colors.push(rng.gen_range(0.5f32..1.0));
            }
        }
        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Placement of one decorative DOM particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomParticle {
    /// Percent of the container width.
    pub left_pct: f64,
    /// Percent of the container height.
    pub top_pct: f64,
    /// Seconds, offsets the shared `float-particle` keyframes.
    pub delay_s: f64,
}

pub const FLOAT_PARTICLE_PERIOD_S: f64 = 6.0;

pub fn scatter_dom_particles<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<DomParticle> {
    (0..count)
        .map(|_| DomParticle {
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..FLOAT_PARTICLE_PERIOD_S),
        })
        .collect()
}

impl DomParticle {
    pub fn css_text(&self) -> String {
        format!(
            "position: absolute; width: 2px; height: 2px; \
             background: var(--primary-color); border-radius: 50%; opacity: 0.3; \
             animation: float-particle {FLOAT_PARTICLE_PERIOD_S}s ease-in-out infinite; \
             animation-delay: {}s; left: {}%; top: {}%;",
            self.delay_s, self.left_pct, self.top_pct
        )
    }
}
