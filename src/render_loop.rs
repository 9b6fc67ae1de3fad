use crate::config::BackgroundConfig;

/// Perspective camera parameters for the background scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub z: f64,
}

impl CameraParams {
    pub fn new(cfg: &BackgroundConfig, width: f64, height: f64) -> Self {
        Self {
            fov_deg: cfg.fov_deg,
            aspect: aspect(width, height),
            near: cfg.near,
            far: cfg.far,
            z: cfg.camera_z,
        }
    }
}

/// Viewport aspect ratio; a collapsed viewport falls back to square.
pub fn aspect(width: f64, height: f64) -> f64 {
    if height > 0.0 && width > 0.0 {
        width / height
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

/// What the render loop draws into. Implemented by the three.js scene
/// handles in the browser.
pub trait FrameTarget {
    fn set_rotation(&self, rotation: Rotation);
    fn render(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStep {
    /// Request another animation frame.
    Continue,
    /// Do not reschedule. Final.
    Stop,
}

/// Per-frame state of the background animation. Rotation accumulates
/// without wrapping.
#[derive(Debug)]
pub struct RenderLoop {
    spin: Rotation,
    rotation: Rotation,
    frames: u64,
    stopped: bool,
}

impl RenderLoop {
    pub fn new(cfg: &BackgroundConfig) -> Self {
        Self {
            spin: Rotation {
                x: cfg.spin_x,
                y: cfg.spin_y,
            },
            rotation: Rotation::default(),
            frames: 0,
            stopped: false,
        }
    }

    /// Advance one frame. `target` is `None` when the scene handles are gone;
    /// that stops the loop for good.
    pub fn tick<T: FrameTarget + ?Sized>(&mut self, target: Option<&T>) -> FrameStep {
        if self.stopped {
            return FrameStep::Stop;
        }
        let Some(target) = target else {
            self.stopped = true;
            log::debug!("scene handles absent, render loop stopped after {} frames", self.frames);
            return FrameStep::Stop;
        };
        self.rotation.x += self.spin.x;
        self.rotation.y += self.spin.y;
        target.set_rotation(self.rotation);
        target.render();
        self.frames += 1;
        FrameStep::Continue
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_defaults() {
        let cam = CameraParams::new(&BackgroundConfig::default(), 1600.0, 900.0);
        assert_eq!(cam.fov_deg, 75.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-12);
        assert_eq!((cam.near, cam.far, cam.z), (0.1, 1000.0, 5.0));
    }

    #[test]
    fn zero_height_aspect_is_square() {
        assert_eq!(aspect(800.0, 0.0), 1.0);
    }
}
