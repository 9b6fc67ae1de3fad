use std::cell::{Cell, RefCell};

use portfolio_fx::background::{setup_background, SceneFactory};
use portfolio_fx::config::BackgroundConfig;
use portfolio_fx::particles::ParticleField;
use portfolio_fx::render_loop::{CameraParams, FrameStep, FrameTarget, RenderLoop, Rotation};
use portfolio_fx::{FxError, FxResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Default)]
struct RecordingScene {
    rotations: RefCell<Vec<Rotation>>,
    renders: Cell<u32>,
}

impl FrameTarget for RecordingScene {
    fn set_rotation(&self, rotation: Rotation) {
        self.rotations.borrow_mut().push(rotation);
    }

    fn render(&self) {
        self.renders.set(self.renders.get() + 1);
    }
}

struct FakeFactory {
    has_surface: bool,
    fail_build: bool,
    builds: Cell<u32>,
    seen: RefCell<Option<(CameraParams, usize)>>,
}

impl FakeFactory {
    fn new(has_surface: bool, fail_build: bool) -> Self {
        Self {
            has_surface,
            fail_build,
            builds: Cell::new(0),
            seen: RefCell::new(None),
        }
    }
}

impl SceneFactory for FakeFactory {
    type Surface = ();
    type Handles = RecordingScene;

    fn surface(&self, id: &str) -> Option<()> {
        assert_eq!(id, "hero-canvas");
        self.has_surface.then_some(())
    }

    fn viewport(&self) -> (f64, f64) {
        (1280.0, 720.0)
    }

    fn build(
        &self,
        _surface: (),
        camera: CameraParams,
        field: &ParticleField,
        _cfg: &BackgroundConfig,
    ) -> FxResult<RecordingScene> {
        self.builds.set(self.builds.get() + 1);
        *self.seen.borrow_mut() = Some((camera, field.len()));
        if self.fail_build {
            return Err(FxError::setup("no WebGL context"));
        }
        Ok(RecordingScene::default())
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(2024)
}

#[test]
fn missing_surface_skips_setup_without_error() {
    let factory = FakeFactory::new(false, false);
    let handles = setup_background(&factory, &BackgroundConfig::default(), &mut rng()).unwrap();
    assert!(handles.is_none());
    assert_eq!(factory.builds.get(), 0);
}

#[test]
fn build_failure_leaves_no_handles() {
    let factory = FakeFactory::new(true, true);
    let result = setup_background(&factory, &BackgroundConfig::default(), &mut rng());
    assert!(matches!(result, Err(FxError::Setup(_))));
}

#[test]
fn unusable_extent_is_a_config_error_not_a_panic() {
    let factory = FakeFactory::new(true, false);
    for extent in [0.0, -3.0, f32::NAN] {
        let cfg = BackgroundConfig {
            extent,
            ..Default::default()
        };
        let result = setup_background(&factory, &cfg, &mut rng());
        assert!(matches!(result, Err(FxError::Config(_))), "extent {extent}");
    }
    assert_eq!(factory.builds.get(), 0);
}

#[test]
fn setup_builds_camera_and_particles() {
    let factory = FakeFactory::new(true, false);
    let handles = setup_background(&factory, &BackgroundConfig::default(), &mut rng()).unwrap();
    assert!(handles.is_some());
    let (camera, particles) = factory.seen.borrow().unwrap();
    assert_eq!(particles, 1000);
    assert_eq!(camera.fov_deg, 75.0);
    assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-12);
    assert_eq!(camera.z, 5.0);
}

#[test]
fn particle_field_bounds() {
    let field = ParticleField::generate(1000, 20.0, &mut rng());
    assert_eq!(field.len(), 1000);
    assert_eq!(field.positions.len(), 3000);
    assert_eq!(field.colors.len(), 3000);
    assert!(field.positions.iter().all(|p| (-10.0..10.0).contains(p)));
    assert!(field.colors.iter().all(|c| (0.5..1.0).contains(c)));
}

#[test]
fn loop_spins_and_renders_each_frame() {
    let scene = RecordingScene::default();
    let mut render = RenderLoop::new(&BackgroundConfig::default());
    for _ in 0..3 {
        assert_eq!(render.tick(Some(&scene)), FrameStep::Continue);
    }
    assert_eq!(scene.renders.get(), 3);
    let last = *scene.rotations.borrow().last().unwrap();
    assert!((last.x - 0.003).abs() < 1e-12);
    assert!((last.y - 0.006).abs() < 1e-12);
    assert_eq!(render.frames(), 3);
}

#[test]
fn loop_shutdown_is_permanent() {
    let scene = RecordingScene::default();
    let mut render = RenderLoop::new(&BackgroundConfig::default());
    assert_eq!(render.tick(Some(&scene)), FrameStep::Continue);
    assert_eq!(render.tick::<RecordingScene>(None), FrameStep::Stop);
    assert!(render.is_stopped());

    // Handles coming back does not resume rendering.
    assert_eq!(render.tick(Some(&scene)), FrameStep::Stop);
    assert_eq!(scene.renders.get(), 1);
    assert_eq!(render.rotation(), *scene.rotations.borrow().last().unwrap());
}

#[test]
fn explicit_stop_halts_loop() {
    let scene = RecordingScene::default();
    let mut render = RenderLoop::new(&BackgroundConfig::default());
    render.stop();
    assert_eq!(render.tick(Some(&scene)), FrameStep::Stop);
    assert_eq!(scene.renders.get(), 0);
}
