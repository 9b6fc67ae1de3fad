//! One-shot setup of the particle background.
//!
//! The graphics library sits behind [`SceneFactory`]; this module decides
//! what gets built and guarantees the scene handles come back as a whole or
//! not at all.

use rand::Rng;

use crate::config::BackgroundConfig;
use crate::error::FxResult;
use crate::particles::ParticleField;
use crate::render_loop::{CameraParams, FrameTarget};

pub trait SceneFactory {
    /// The element the renderer draws into.
    type Surface;
    /// Scene, camera, renderer and point cloud, owned together.
    type Handles: FrameTarget;

    fn surface(&self, id: &str) -> Option<Self::Surface>;

    /// Viewport width and height in CSS pixels.
    fn viewport(&self) -> (f64, f64);

    fn build(
        &self,
        surface: Self::Surface,
        camera: CameraParams,
        field: &ParticleField,
        cfg: &BackgroundConfig,
    ) -> FxResult<Self::Handles>;
}

/// `Ok(None)` when the page has no render surface; that is not an error.
/// An unusable `cfg` is reported as [`FxError::Config`](crate::FxError)
/// before anything is built.
pub fn setup_background<F, R>(
    factory: &F,
    cfg: &BackgroundConfig,
    rng: &mut R,
) -> FxResult<Option<F::Handles>>
where
    F: SceneFactory + ?Sized,
    R: Rng + ?Sized,
{
    cfg.validate()?;
    let Some(surface) = factory.surface(&cfg.canvas_id) else {
        log::info!("#{} not found, skipping 3D background", cfg.canvas_id);
        return Ok(None);
    };
    let (width, height) = factory.viewport();
    let camera = CameraParams::new(cfg, width, height);
    let field = ParticleField::generate(cfg.particle_count, cfg.extent, rng);
    let handles = factory.build(surface, camera, &field, cfg)?;
    log::info!("3D background ready with {} particles", field.len());
    Ok(Some(handles))
}
