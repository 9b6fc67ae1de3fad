//! GSAP bindings. The `gsap` global is resolved at call time, so these are
//! only called after the timeline capability is ready.

use wasm_bindgen::prelude::*;

use crate::error::FxResult;
use crate::scroll_trigger::Playback;
use crate::timeline::TweenVars;

#[wasm_bindgen]
extern "C" {
    pub type Timeline;
    pub type Tween;

    #[wasm_bindgen(method, catch, js_name = from)]
    fn from_at(
        this: &Timeline,
        targets: &str,
        vars: &JsValue,
        position: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = play)]
    fn js_play(this: &Tween);
    #[wasm_bindgen(method, js_name = reverse)]
    fn js_reverse(this: &Tween);
    #[wasm_bindgen(method, js_name = restart)]
    fn js_restart(this: &Tween);
    #[wasm_bindgen(method, js_name = pause)]
    fn js_pause(this: &Tween);
    #[wasm_bindgen(method, js_name = resume)]
    fn js_resume(this: &Tween);
    #[wasm_bindgen(method, js_name = progress)]
    fn js_progress(this: &Tween, value: f64);
}

#[wasm_bindgen(js_namespace = gsap)]
extern "C" {
    #[wasm_bindgen(catch, js_name = timeline)]
    fn new_timeline() -> Result<Timeline, JsValue>;

    #[wasm_bindgen(catch, js_name = from)]
    fn tween_from(targets: &str, vars: &JsValue) -> Result<Tween, JsValue>;

    #[wasm_bindgen(catch, js_name = to)]
    fn tween_to(target: &JsValue, vars: &JsValue) -> Result<Tween, JsValue>;

    #[wasm_bindgen(catch, js_name = registerPlugin)]
    fn register_plugin_raw(plugin: &JsValue) -> Result<(), JsValue>;
}

fn vars_object(vars: &TweenVars) -> FxResult<JsValue> {
    Ok(js_sys::JSON::parse(&vars.to_json())?)
}

pub fn timeline() -> FxResult<Timeline> {
    Ok(new_timeline()?)
}

impl Timeline {
    /// Add a `from` step starting at `position` seconds.
    pub fn add_from(&self, targets: &str, vars: &TweenVars, position: f64) -> FxResult<()> {
        self.from_at(targets, &vars_object(vars)?, position)?;
        Ok(())
    }
}

pub fn from(targets: &str, vars: &TweenVars) -> FxResult<Tween> {
    Ok(tween_from(targets, &vars_object(vars)?)?)
}

pub fn to(target: &JsValue, vars: &TweenVars) -> FxResult<Tween> {
    Ok(tween_to(target, &vars_object(vars)?)?)
}

pub fn register_plugin(plugin: &JsValue) -> FxResult<()> {
    Ok(register_plugin_raw(plugin)?)
}

impl Playback for Tween {
    fn play(&self) {
        self.js_play();
    }

    fn reverse(&self) {
        self.js_reverse();
    }

    fn restart(&self) {
        self.js_restart();
    }

    fn pause(&self) {
        self.js_pause();
    }

    fn resume(&self) {
        self.js_resume();
    }

    fn reset(&self) {
        self.js_pause();
        self.js_progress(0.0);
    }

    fn complete(&self) {
        self.js_progress(1.0);
    }
}
