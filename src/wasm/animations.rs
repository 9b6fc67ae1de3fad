use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, HtmlElement, Window};

use super::{dom, gsap, poll};
use crate::error::FxResult;
use crate::scroll_trigger::{scroll_reveals, Bounds, ScrollTrigger};
use crate::timeline::{entrance_timeline, layout};

/// Timeline-capability setup. The entrance cascade and the scroll reveals
/// fail independently.
pub fn initialize(window: &Window, document: &Document) {
    if let Some(plugin) = poll::global("ScrollTrigger") {
        if let Err(e) = gsap::register_plugin(&plugin) {
            log::debug!("ScrollTrigger plugin not registered: {e}");
        }
    }
    match init_hero(document) {
        Ok(steps) => log::debug!("hero timeline with {steps} steps"),
        Err(e) => log::warn!("hero animations failed: {e}"),
    }
    if let Err(e) = init_scroll_reveals(window, document) {
        log::warn!("scroll animations failed: {e}");
    }
}

/// Number of entrance steps added. Pages without any hero target never touch
/// the timeline library.
fn init_hero(document: &Document) -> FxResult<usize> {
    let steps = entrance_timeline();
    if steps.iter().all(|step| dom::count(document, step.targets) == 0) {
        return Ok(0);
    }
    let starts = layout(&steps, |selector| dom::count(document, selector));
    let tl = gsap::timeline()?;
    let mut added = 0;
    for (step, start) in steps.iter().zip(starts) {
        if dom::count(document, step.targets) == 0 {
            continue;
        }
        match tl.add_from(step.targets, &step.vars, start) {
            Ok(()) => added += 1,
            Err(e) => log::warn!("entrance step {} skipped: {e}", step.targets),
        }
    }
    Ok(added)
}

struct Binding {
    section: HtmlElement,
    tween: gsap::Tween,
    trigger: ScrollTrigger,
}

/// Bind every reveal whose section and targets exist. A tween that fails to
/// build is skipped; the ones already built still get their listeners.
fn init_scroll_reveals(window: &Window, document: &Document) -> FxResult<usize> {
    let mut bindings = Vec::new();
    for reveal in scroll_reveals() {
        let Some(section) = dom::query(document, reveal.trigger) else {
            continue;
        };
        if dom::count(document, reveal.targets) == 0 {
            continue;
        }
        // Paused: the trigger decides when it plays.
        let tween = match gsap::from(reveal.targets, &reveal.vars.clone().paused()) {
            Ok(tween) => tween,
            Err(e) => {
                log::warn!("scroll reveal for {} skipped: {e}", reveal.targets);
                continue;
            }
        };
        bindings.push(Binding {
            section,
            tween,
            trigger: ScrollTrigger::new(reveal.config),
        });
    }
    let bound = bindings.len();
    if bound == 0 {
        return Ok(0);
    }
    log::debug!("{bound} scroll reveals bound");

    let bindings = Rc::new(RefCell::new(bindings));
    let refresh = {
        let window = window.clone();
        let bindings = bindings.clone();
        move |_: web_sys::Event| refresh_all(&window, &bindings)
    };
    dom::listen(window, "scroll", refresh.clone())?;
    dom::listen(window, "resize", refresh)?;
    refresh_all(window, &bindings);
    Ok(bound)
}

fn refresh_all(window: &Window, bindings: &RefCell<Vec<Binding>>) {
    let (_, viewport_height) = dom::viewport(window);
    for b in bindings.borrow_mut().iter_mut() {
        let rect = b.section.get_bounding_client_rect();
        let bounds = Bounds {
            top: rect.top(),
            bottom: rect.bottom(),
        };
        b.trigger.update(bounds, viewport_height, &b.tween);
    }
}
