//! Thin helpers over `web_sys`. Every query returns `Option`/`Vec`; an
//! absent element is never an error.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::{FxConfig, CONFIG_ELEMENT_ID};
use crate::error::{FxError, FxResult};

impl From<JsValue> for FxError {
    fn from(e: JsValue) -> Self {
        FxError::js(e.as_string().unwrap_or_else(|| format!("{e:?}")))
    }
}

impl From<FxError> for JsValue {
    fn from(e: FxError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// First match for `selector`. An invalid selector counts as no match.
pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

pub fn query_in(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn count(document: &Document, selector: &str) -> usize {
    document
        .query_selector_all(selector)
        .map(|list| list.length() as usize)
        .unwrap_or(0)
}

pub fn set_styles(el: &HtmlElement, props: &[(&str, &str)]) -> FxResult<()> {
    let style = el.style();
    for (name, value) in props {
        style.set_property(name, value)?;
    }
    Ok(())
}

pub fn viewport(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Attach a handler for the life of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> FxResult<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_timeout(window: &Window, delay_ms: i32, f: impl FnOnce() + 'static) -> FxResult<i32> {
    let callback = Closure::once_into_js(f);
    let handle = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)?;
    Ok(handle)
}

pub fn request_frame(window: &Window, f: impl FnOnce() + 'static) -> FxResult<i32> {
    let callback = Closure::once_into_js(f);
    Ok(window.request_animation_frame(callback.unchecked_ref())?)
}

/// Call `on_visible` the first time each element intersects the viewport,
/// then stop watching that element.
pub fn on_first_visible(
    elements: &[HtmlElement],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_visible: impl FnMut(Element) + 'static,
) -> FxResult<()> {
    if elements.is_empty() {
        return Ok(());
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for el in elements {
        observer.observe(el);
    }
    callback.forget();
    Ok(())
}

/// Read the optional `#fx-config` JSON block. Bad JSON falls back to defaults.
pub fn load_config(document: &Document) -> FxConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return FxConfig::default();
    };
    FxConfig::from_json(&text).unwrap_or_else(|e| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
        FxConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    #[wasm_bindgen_test]
    fn absent_elements_are_not_errors() {
        let document = document();
        assert!(query(&document, ".hamburger").is_none());
        assert!(query_all(&document, ".stat-number").is_empty());
        assert_eq!(count(&document, ".hero-buttons"), 0);
    }

    #[wasm_bindgen_test]
    fn invalid_selector_matches_nothing() {
        let document = document();
        assert!(query(&document, "[[").is_none());
        assert!(query_all(&document, "[[").is_empty());
        assert_eq!(count(&document, "[["), 0);
    }

    #[wasm_bindgen_test]
    fn queries_find_inserted_elements() {
        let document = document();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            r#"<span class="fx-query-item"></span><span class="fx-query-item"></span>"#,
        );
        document.body().unwrap().append_child(&root).unwrap();

        assert_eq!(query_all(&document, ".fx-query-item").len(), 2);
        assert!(query_in(&root, "span").is_some());
        root.remove();
    }

    fn with_config_block(text: &str) -> FxConfig {
        let document = document();
        let block = document.create_element("script").unwrap();
        block.set_id(CONFIG_ELEMENT_ID);
        block.set_attribute("type", "application/json").unwrap();
        block.set_text_content(Some(text));
        document.body().unwrap().append_child(&block).unwrap();
        let cfg = load_config(&document);
        block.remove();
        cfg
    }

    #[wasm_bindgen_test]
    fn config_block_overrides_defaults() {
        let cfg = with_config_block(r#"{ "dom_particles": 5 }"#);
        assert_eq!(cfg.dom_particles, 5);
        assert_eq!(cfg.background, FxConfig::default().background);
    }

    #[wasm_bindgen_test]
    fn unusable_config_block_falls_back_to_defaults() {
        assert_eq!(
            with_config_block(r#"{ "background": { "extent": 0 } }"#),
            FxConfig::default()
        );
        assert_eq!(with_config_block("{ nope"), FxConfig::default());
        assert_eq!(load_config(&document()), FxConfig::default());
    }
}
