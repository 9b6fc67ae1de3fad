use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, Window};

use super::three::{
    BufferAttribute, BufferGeometry, PerspectiveCamera, Points, PointsMaterial, Scene,
    WebGLRenderer,
};
use super::{dom, page_rng};
use crate::background::{setup_background, SceneFactory};
use crate::config::BackgroundConfig;
use crate::error::{FxError, FxResult};
use crate::particles::ParticleField;
use crate::readiness::CancelToken;
use crate::render_loop::{aspect, CameraParams, FrameStep, FrameTarget, RenderLoop, Rotation};

/// Scene, camera, renderer and point cloud. Built in one go, so a value of
/// this type is always complete.
pub struct SceneHandles {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: WebGLRenderer,
    points: Points,
}

impl FrameTarget for SceneHandles {
    fn set_rotation(&self, rotation: Rotation) {
        let r = self.points.rotation();
        r.set_x(rotation.x);
        r.set_y(rotation.y);
    }

    fn render(&self) {
        self.renderer.render(&self.scene, &self.camera);
    }
}

impl SceneHandles {
    fn resize(&self, width: f64, height: f64) {
        self.camera.set_aspect(aspect(width, height));
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height);
    }
}

struct ThreeFactory<'a> {
    window: &'a Window,
    document: &'a Document,
}

fn object(entries: &[(&str, JsValue)]) -> FxResult<JsValue> {
    let obj = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj.into())
}

impl SceneFactory for ThreeFactory<'_> {
    type Surface = HtmlCanvasElement;
    type Handles = SceneHandles;

    fn surface(&self, id: &str) -> Option<HtmlCanvasElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    }

    fn viewport(&self) -> (f64, f64) {
        dom::viewport(self.window)
    }

    fn build(
        &self,
        canvas: HtmlCanvasElement,
        camera: CameraParams,
        field: &ParticleField,
        cfg: &BackgroundConfig,
    ) -> FxResult<SceneHandles> {
        let scene = Scene::new()?;
        let cam = PerspectiveCamera::new(camera.fov_deg, camera.aspect, camera.near, camera.far)?;
        cam.position().set_z(camera.z);

        let renderer = WebGLRenderer::new(&object(&[
            ("canvas", JsValue::from(canvas)),
            ("alpha", JsValue::TRUE),
            ("antialias", JsValue::TRUE),
        ])?)
        .map_err(|e| FxError::setup(format!("WebGL renderer: {e:?}")))?;
        let (width, height) = self.viewport();
        renderer.set_size(width, height);
        renderer.set_clear_color(0x000000, 0.0);

        let geometry = BufferGeometry::new()?;
        let positions = js_sys::Float32Array::from(field.positions.as_slice());
        let colors = js_sys::Float32Array::from(field.colors.as_slice());
        geometry.set_attribute("position", &BufferAttribute::new(&positions, 3)?);
        geometry.set_attribute("color", &BufferAttribute::new(&colors, 3)?);

        let material = PointsMaterial::new(&object(&[
            ("size", JsValue::from_f64(cfg.point_size)),
            ("vertexColors", JsValue::TRUE),
            ("transparent", JsValue::TRUE),
            ("opacity", JsValue::from_f64(cfg.opacity)),
        ])?)?;
        let points = Points::new(&geometry, &material)?;
        scene.add(&points);

        Ok(SceneHandles {
            scene,
            camera: cam,
            renderer,
            points,
        })
    }
}

/// Graphics-capability setup: build the scene and start rendering. Errors
/// leave no handles behind; the caller logs them and moves on.
pub fn init(
    window: &Window,
    document: &Document,
    cfg: &BackgroundConfig,
    cancel: CancelToken,
) -> FxResult<()> {
    let factory = ThreeFactory { window, document };
    let Some(handles) = setup_background(&factory, cfg, &mut page_rng())? else {
        return Ok(());
    };
    let handles = Rc::new(RefCell::new(Some(handles)));

    // Resize
    {
        let w = window.clone();
        let handles = handles.clone();
        dom::listen(window, "resize", move |_| {
            if let Some(scene) = handles.borrow().as_ref() {
                let (width, height) = dom::viewport(&w);
                scene.resize(width, height);
            }
        })?;
    }

    start_loop(window, handles, RenderLoop::new(cfg), cancel)
}

fn start_loop(
    window: &Window,
    handles: Rc<RefCell<Option<SceneHandles>>>,
    mut state: RenderLoop,
    cancel: CancelToken,
) -> FxResult<()> {
    // `f` holds the animation-frame closure so it can keep requesting
    // itself. The `Option` lets us build the closure before referencing it.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let w = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancel.is_cancelled() {
            handles.borrow_mut().take();
        }
        let step = state.tick(handles.borrow().as_ref());
        if step == FrameStep::Stop {
            return;
        }
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = g.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
