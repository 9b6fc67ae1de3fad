use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Window;

use super::dom;
use crate::readiness::{PollStep, ReadinessPoller};

/// Whether `name` is defined on the global object.
pub fn global_present(name: &str) -> bool {
    global(name).is_some()
}

pub fn global(name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Check now, then every `interval_ms` until the poller reaches a terminal
/// step. Readiness callbacks fire from inside the successful check.
pub fn poll_until_ready(
    window: Window,
    poller: ReadinessPoller,
    check: impl Fn() -> bool + 'static,
) {
    attempt(window, Rc::new(RefCell::new(poller)), Rc::new(check));
}

fn attempt(window: Window, poller: Rc<RefCell<ReadinessPoller>>, check: Rc<dyn Fn() -> bool>) {
    let step = poller.borrow_mut().step(check());
    if let PollStep::RetryIn(ms) = step {
        let (w, p, c) = (window.clone(), poller.clone(), check.clone());
        let delay = i32::try_from(ms).unwrap_or(i32::MAX);
        if let Err(e) = dom::set_timeout(&window, delay, move || attempt(w, p, c)) {
            log::warn!(
                "could not reschedule {} poll: {e}",
                poller.borrow().capability().global_name()
            );
        }
    }
}
