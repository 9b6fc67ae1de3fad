//! Page wiring that runs at startup regardless of which optional libraries
//! show up.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, HtmlAnchorElement, HtmlElement, MouseEvent, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

use super::{dom, gsap, page_rng};
use crate::config::TypingConfig;
use crate::error::{FxError, FxResult};
use crate::particles::scatter_dom_particles;
use crate::readiness::{Capability, Readiness};
use crate::timeline::{Ease, TweenVars};
use crate::ui::{
    is_placeholder_link, navbar_style, parallax_transform, project_link_style, Typewriter,
    CURSOR_TRAIL_CSS, FLOAT_PARTICLE_KEYFRAMES, PARTICLES_CONTAINER_CSS, REVEAL_ROOT_MARGIN,
    REVEAL_SELECTOR, REVEAL_THRESHOLD,
};

fn body(document: &Document) -> FxResult<HtmlElement> {
    document.body().ok_or_else(|| FxError::missing("body"))
}

pub fn init_navigation(document: &Document) -> FxResult<()> {
    let hamburger = dom::query(document, ".hamburger");
    let menu = dom::query(document, ".nav-menu");

    if let Some(h) = &hamburger {
        let (h2, menu) = (h.clone(), menu.clone());
        dom::listen(h, "click", move |_| {
            let _ = h2.class_list().toggle("active");
            if let Some(m) = &menu {
                let _ = m.class_list().toggle("active");
            }
        })?;
    }

    for link in dom::query_all(document, ".nav-link") {
        let (hamburger, menu, doc) = (hamburger.clone(), menu.clone(), document.clone());
        let href = link.get_attribute("href");
        dom::listen(&link, "click", move |e: Event| {
            for el in hamburger.iter().chain(menu.iter()) {
                let _ = el.class_list().remove_1("active");
            }
            e.prevent_default();
            if let Some(section) = href.as_deref().and_then(|sel| dom::query(&doc, sel)) {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                section.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        })?;
    }
    Ok(())
}

pub fn init_parallax(window: &Window, document: &Document) -> FxResult<()> {
    let elements = dom::query_all(document, ".element");
    if elements.is_empty() {
        return Ok(());
    }
    let w = window.clone();
    dom::listen(window, "scroll", move |_| {
        let scrolled = dom::scroll_y(&w);
        for el in &elements {
            let transform = parallax_transform(scrolled, el.get_attribute("data-speed").as_deref());
            let _ = el.style().set_property("transform", &transform);
        }
    })
}

pub fn init_skill_interactions(document: &Document, readiness: Rc<Readiness>) -> FxResult<()> {
    let items = dom::query_all(document, ".skill-item");
    log::debug!("found {} skill items", items.len());

    for item in items {
        dom::set_styles(&item, &[("opacity", "1"), ("transform", "none")])?;
        for (event, scale) in [("mouseenter", 1.1), ("mouseleave", 1.0)] {
            let (target, readiness) = (item.clone(), readiness.clone());
            dom::listen(&item, event, move |_| hover_scale(&target, scale, &readiness))?;
        }
    }
    Ok(())
}

fn hover_scale(item: &HtmlElement, scale: f64, readiness: &Readiness) {
    if readiness.is_ready(Capability::Timeline) {
        let vars = TweenVars::new(0.3, Ease::Power2Out).scale(scale);
        if gsap::to(&JsValue::from(item.clone()), &vars).is_ok() {
            return;
        }
    }
    let _ = item
        .style()
        .set_property("transform", &format!("scale({scale})"));
}

pub fn init_navbar_scroll(window: &Window, document: &Document, threshold: f64) -> FxResult<()> {
    let Some(navbar) = dom::query(document, ".navbar") else {
        return Ok(());
    };
    let w = window.clone();
    dom::listen(window, "scroll", move |_| {
        let style = navbar_style(dom::scroll_y(&w), threshold);
        let _ = dom::set_styles(
            &navbar,
            &[("background", style.background), ("box-shadow", style.box_shadow)],
        );
    })
}

pub fn init_typing_effect(window: &Window, document: &Document, cfg: &TypingConfig) -> FxResult<()> {
    let Some(title) = dom::query(document, ".title") else {
        return Ok(());
    };
    let typer = Typewriter::new(&title.text_content().unwrap_or_default());
    title.set_text_content(Some(""));

    let (w, delay) = (window.clone(), cfg.char_delay_ms);
    dom::set_timeout(window, cfg.start_delay_ms, move || type_next(w, title, typer, delay))?;
    Ok(())
}

fn type_next(window: Window, title: HtmlElement, mut typer: Typewriter, delay_ms: i32) {
    let Some(text) = typer.advance() else {
        return;
    };
    title.set_text_content(Some(&text));
    if typer.is_done() {
        return;
    }
    let w = window.clone();
    if let Err(e) = dom::set_timeout(&window, delay_ms, move || type_next(w, title, typer, delay_ms)) {
        log::warn!("typing effect stopped: {e}");
    }
}

pub fn init_project_links(window: &Window, document: &Document) -> FxResult<()> {
    let links = dom::query_all(document, ".project-link");
    for link in &links {
        dom::set_styles(link, &[("pointer-events", "auto"), ("cursor", "pointer")])?;

        let Some(anchor) = link.dyn_ref::<HtmlAnchorElement>().cloned() else {
            continue;
        };
        let w = window.clone();
        dom::listen(link, "click", move |e: Event| {
            let page = w.location().href().unwrap_or_default();
            if is_placeholder_link(&anchor.href(), &page) {
                e.prevent_default();
                log::debug!("placeholder project link, navigation prevented");
            }
        })?;

        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = link.clone();
            dom::listen(link, event, move |_| {
                let s = project_link_style(hovered);
                let _ = dom::set_styles(
                    &target,
                    &[
                        ("transform", s.transform),
                        ("background", s.background),
                        ("color", s.color),
                    ],
                );
            })?;
        }
    }
    log::debug!("project links initialized: {}", links.len());
    Ok(())
}

/// Undo any hidden state left on the skills grid by stylesheet defaults.
pub fn ensure_skill_items_visible(document: &Document) -> FxResult<()> {
    for category in dom::query_all(document, ".skill-category") {
        dom::set_styles(&category, &[("opacity", "1"), ("transform", "none")])?;
    }
    for item in dom::query_all(document, ".skill-item") {
        dom::set_styles(
            &item,
            &[("opacity", "1"), ("transform", "none"), ("display", "flex")],
        )?;
        for inner in ["i", "span"] {
            if let Some(el) = dom::query_in(&item, inner) {
                dom::set_styles(&el, &[("display", "block"), ("opacity", "1")])?;
            }
        }
    }
    Ok(())
}

pub fn init_reveal_observer(document: &Document) -> FxResult<()> {
    let elements = dom::query_all(document, REVEAL_SELECTOR);
    dom::on_first_visible(&elements, REVEAL_THRESHOLD, Some(REVEAL_ROOT_MARGIN), |el| {
        let _ = el.class_list().add_1("visible");
    })
}

pub fn init_cursor_trail(window: &Window, document: &Document) -> FxResult<()> {
    let cursor: HtmlElement = document.create_element("div")?.unchecked_into();
    cursor.set_class_name("cursor-trail");
    cursor.style().set_css_text(CURSOR_TRAIL_CSS);
    body(document)?.append_child(&cursor)?;

    if js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart"))? {
        cursor.style().set_property("display", "none")?;
    }

    dom::listen(document, "mousemove", move |e: Event| {
        if let Some(m) = e.dyn_ref::<MouseEvent>() {
            let left = format!("{}px", m.client_x());
            let top = format!("{}px", m.client_y());
            let _ = dom::set_styles(&cursor, &[("left", left.as_str()), ("top", top.as_str())]);
        }
    })
}

pub fn inject_keyframes(document: &Document) -> FxResult<()> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(FLOAT_PARTICLE_KEYFRAMES));
    let head = document.head().ok_or_else(|| FxError::missing("head"))?;
    head.append_child(&style)?;
    Ok(())
}

pub fn create_particles(document: &Document, count: usize) -> FxResult<()> {
    let container: HtmlElement = document.create_element("div")?.unchecked_into();
    container.set_class_name("particles-container");
    container.style().set_css_text(PARTICLES_CONTAINER_CSS);
    body(document)?.append_child(&container)?;

    for p in scatter_dom_particles(count, &mut page_rng()) {
        let particle: HtmlElement = document.create_element("div")?.unchecked_into();
        particle.set_class_name("particle");
        particle.style().set_css_text(&p.css_text());
        container.append_child(&particle)?;
    }
    Ok(())
}

/// Add `loaded` to the body once the page has loaded. The module usually
/// boots after `load` has already fired, in which case the class goes on now.
pub fn mark_loaded_on_load(window: &Window, document: &Document) -> FxResult<()> {
    if document.ready_state() == "complete" {
        return mark_loaded(document);
    }
    let doc = document.clone();
    dom::listen(window, "load", move |_| {
        if let Err(e) = mark_loaded(&doc) {
            log::warn!("could not mark page loaded: {e}");
        }
    })
}

fn mark_loaded(document: &Document) -> FxResult<()> {
    body(document)?.class_list().add_1("loaded")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    async fn page_loaded(window: &Window, document: &Document) {
        if document.ready_state() == "complete" {
            return;
        }
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            window
                .add_event_listener_with_callback("load", &resolve)
                .unwrap();
        });
        wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
    }

    #[wasm_bindgen_test(async)]
    async fn late_boot_marks_body_loaded_immediately() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        page_loaded(&window, &document).await;
        let body = document.body().unwrap();
        body.class_list().remove_1("loaded").unwrap();

        mark_loaded_on_load(&window, &document).unwrap();
        assert!(body.class_list().contains("loaded"));
    }

    #[wasm_bindgen_test]
    fn reveal_observer_tolerates_empty_page() {
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(dom::query_all(&document, REVEAL_SELECTOR).is_empty());
        init_reveal_observer(&document).unwrap();
    }
}
