//! Visual effects for the portfolio page, compiled to WebAssembly.
//!
//! The modules at the top level are plain Rust and build (and test) on any
//! target. The browser glue lives in `wasm` and only exists on wasm32.

pub mod background;
pub mod config;
pub mod counter;
pub mod error;
pub mod particles;
pub mod readiness;
pub mod render_loop;
pub mod scroll_trigger;
pub mod timeline;
pub mod ui;

pub use error::{FxError, FxResult};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Window};

    use crate::error::FxResult;
    use crate::readiness::{CancelToken, Capability, Readiness, ReadinessPoller};

    #[cfg(test)]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    mod animations;
    mod background;
    mod counters;
    mod dom;
    mod gsap;
    mod page;
    mod poll;
    mod three;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if document.ready_state() == "loading" {
            let (w, d) = (window.clone(), document.clone());
            let on_ready = Closure::once_into_js(move || boot(w, d));
            document
                .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        } else {
            boot(window, document);
        }
        Ok(())
    }

    /// Browser RNG; `getrandom` is not wired up for wasm32, so seed from `Math.random()`.
    pub(crate) fn page_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
    }

    fn boot(window: Window, document: Document) {
        let config = dom::load_config(&document);
        let readiness = Readiness::new();
        let cancel = CancelToken::new();

        // Page wiring does not depend on any optional library.
        let wiring: [(&str, FxResult<()>); 12] = [
            ("keyframes", page::inject_keyframes(&document)),
            ("navigation", page::init_navigation(&document)),
            ("counters", counters::init(&window, &document, &config.counter)),
            ("parallax", page::init_parallax(&window, &document)),
            ("skill interactions", page::init_skill_interactions(&document, readiness.clone())),
            ("navbar", page::init_navbar_scroll(&window, &document, config.navbar_scroll_threshold)),
            ("typing", page::init_typing_effect(&window, &document, &config.typing)),
            ("project links", page::init_project_links(&window, &document)),
            ("skill visibility", page::ensure_skill_items_visible(&document)),
            ("reveal", page::init_reveal_observer(&document)),
            ("cursor", page::init_cursor_trail(&window, &document)),
            ("particles", page::create_particles(&document, config.dom_particles)),
        ];
        for (name, result) in wiring {
            if let Err(e) = result {
                log::warn!("{name} init failed: {e}");
            }
        }
        if let Err(e) = page::mark_loaded_on_load(&window, &document) {
            log::warn!("load hook failed: {e}");
        }

        {
            let (w, d) = (window.clone(), document.clone());
            readiness.on_ready(Capability::Timeline, move || animations::initialize(&w, &d));
        }
        {
            let (w, d) = (window.clone(), document.clone());
            let (cfg, cancel) = (config.background.clone(), cancel.clone());
            readiness.on_ready(Capability::Graphics, move || {
                if let Err(e) = background::init(&w, &d, &cfg, cancel) {
                    log::warn!("3D background disabled: {e}");
                }
            });
        }

        for capability in Capability::ALL {
            let poller =
                ReadinessPoller::new(capability, config.poll, readiness.clone(), cancel.clone());
            poll::poll_until_ready(window.clone(), poller, move || {
                poll::global_present(capability.global_name())
            });
        }

        let teardown = cancel.clone();
        if let Err(e) = dom::listen(&window, "pagehide", move |_| teardown.cancel()) {
            log::warn!("pagehide hook failed: {e}");
        }
    }
}
