use web_sys::{Document, Element, Window};

use super::dom;
use crate::config::CounterConfig;
use crate::counter::{parse_target, CounterAnimation, CounterFrame};
use crate::error::FxResult;

/// Count each `.stat-number` up to its `data-target` the first time it is
/// half visible.
pub fn init(window: &Window, document: &Document, cfg: &CounterConfig) -> FxResult<()> {
    for counter in dom::query_all(document, ".stat-number") {
        let target = parse_target(&counter.get_attribute("data-target").unwrap_or_default());
        let mut pending = Some(CounterAnimation::new(target, cfg));
        let window = window.clone();
        dom::on_first_visible(&[counter], cfg.threshold, None, move |el| {
            if let Some(animation) = pending.take() {
                frame(window.clone(), el, animation);
            }
        })?;
    }
    Ok(())
}

// The first frame runs synchronously from the observer callback.
fn frame(window: Window, el: Element, mut animation: CounterAnimation) {
    match animation.next_frame() {
        CounterFrame::Show(text) => {
            el.set_text_content(Some(&text));
            let w = window.clone();
            if let Err(e) = dom::request_frame(&window, move || frame(w, el, animation)) {
                log::warn!("counter stalled: {e}");
            }
        }
        CounterFrame::Finish(text) => el.set_text_content(Some(&text)),
    }
}
