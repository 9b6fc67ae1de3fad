//! The slice of three.js the background needs.

#![allow(clippy::upper_case_acronyms)]

use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    pub type Scene;
    #[wasm_bindgen(constructor, catch)]
    pub fn new() -> Result<Scene, JsValue>;
    #[wasm_bindgen(method)]
    pub fn add(this: &Scene, object: &Points);

    pub type PerspectiveCamera;
    #[wasm_bindgen(constructor, catch)]
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Result<PerspectiveCamera, JsValue>;
    #[wasm_bindgen(method, getter)]
    pub fn position(this: &PerspectiveCamera) -> Vector3;
    #[wasm_bindgen(method, setter)]
    pub fn set_aspect(this: &PerspectiveCamera, aspect: f64);
    #[wasm_bindgen(method, js_name = updateProjectionMatrix)]
    pub fn update_projection_matrix(this: &PerspectiveCamera);

    pub type Vector3;
    #[wasm_bindgen(method, setter)]
    pub fn set_z(this: &Vector3, z: f64);

    pub type Euler;
    #[wasm_bindgen(method, setter)]
    pub fn set_x(this: &Euler, x: f64);
    #[wasm_bindgen(method, setter)]
    pub fn set_y(this: &Euler, y: f64);

    pub type WebGLRenderer;
    /// Throws when no WebGL context can be created.
    #[wasm_bindgen(constructor, catch)]
    pub fn new(params: &JsValue) -> Result<WebGLRenderer, JsValue>;
    #[wasm_bindgen(method, js_name = setSize)]
    pub fn set_size(this: &WebGLRenderer, width: f64, height: f64);
    #[wasm_bindgen(method, js_name = setClearColor)]
    pub fn set_clear_color(this: &WebGLRenderer, color: u32, alpha: f64);
    #[wasm_bindgen(method)]
    pub fn render(this: &WebGLRenderer, scene: &Scene, camera: &PerspectiveCamera);

    pub type BufferGeometry;
    #[wasm_bindgen(constructor, catch)]
    pub fn new() -> Result<BufferGeometry, JsValue>;
    #[wasm_bindgen(method, js_name = setAttribute)]
    pub fn set_attribute(this: &BufferGeometry, name: &str, attribute: &BufferAttribute);

    pub type BufferAttribute;
    #[wasm_bindgen(constructor, catch)]
    pub fn new(array: &js_sys::Float32Array, item_size: u32) -> Result<BufferAttribute, JsValue>;

    pub type PointsMaterial;
    #[wasm_bindgen(constructor, catch)]
    pub fn new(params: &JsValue) -> Result<PointsMaterial, JsValue>;

    pub type Points;
    #[wasm_bindgen(constructor, catch)]
    pub fn new(geometry: &BufferGeometry, material: &PointsMaterial) -> Result<Points, JsValue>;
    #[wasm_bindgen(method, getter)]
    pub fn rotation(this: &Points) -> Euler;
}
