//! Pure pieces of the page wiring: styles and small state machines the
//! browser glue applies to elements.

pub const NAVBAR_BG_SCROLLED: &str = "rgba(255, 255, 255, 0.98)";
pub const NAVBAR_BG_TOP: &str = "rgba(255, 255, 255, 0.95)";
pub const NAVBAR_SHADOW_SCROLLED: &str = "0 2px 20px rgba(0, 0, 0, 0.1)";

/// Elements that get the `visible` class on first intersection.
pub const REVEAL_SELECTOR: &str = ".fade-in, .slide-in-left, .slide-in-right, .scale-in";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const CURSOR_TRAIL_CSS: &str = "position: fixed; width: 20px; height: 20px; \
    background: var(--primary-color); border-radius: 50%; pointer-events: none; \
    z-index: 9999; opacity: 0.6; transform: translate(-50%, -50%); transition: all 0.1s ease;";

pub const PARTICLES_CONTAINER_CSS: &str = "position: fixed; top: 0; left: 0; \
    width: 100%; height: 100%; pointer-events: none; z-index: -1;";

pub const FLOAT_PARTICLE_KEYFRAMES: &str = "@keyframes float-particle { \
    0%, 100% { transform: translateY(0px) translateX(0px); opacity: 0.3; } \
    50% { transform: translateY(-20px) translateX(10px); opacity: 0.6; } }";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

pub fn navbar_style(scroll_y: f64, threshold: f64) -> NavbarStyle {
    if scroll_y > threshold {
        NavbarStyle {
            background: NAVBAR_BG_SCROLLED,
            box_shadow: NAVBAR_SHADOW_SCROLLED,
        }
    } else {
        NavbarStyle {
            background: NAVBAR_BG_TOP,
            box_shadow: "none",
        }
    }
}

/// Vertical offset for a floating element; `speed` comes from `data-speed`.
/// An absent or unparsable speed leaves the element in place.
pub fn parallax_offset(scroll_y: f64, speed: Option<&str>) -> f64 {
    let speed = speed
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0);
    -(scroll_y * speed)
}

pub fn parallax_transform(scroll_y: f64, speed: Option<&str>) -> String {
    format!("translateY({}px)", parallax_offset(scroll_y, speed))
}

/// Types a string out one character at a time.
#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveal one more character and return the visible text, or `None`
    /// once everything is shown.
    pub fn advance(&mut self) -> Option<String> {
        if self.shown >= self.chars.len() {
            return None;
        }
        self.shown += 1;
        Some(self.chars[..self.shown].iter().collect())
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }
}

/// A project link still pointing at `#` (or at the page itself plus `#`).
pub fn is_placeholder_link(href: &str, page_url: &str) -> bool {
    href == "#" || href.strip_suffix('#') == Some(page_url)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverStyle {
    pub transform: &'static str,
    pub background: &'static str,
    pub color: &'static str,
}

pub fn project_link_style(hovered: bool) -> HoverStyle {
    if hovered {
        HoverStyle {
            transform: "scale(1.1)",
            background: "var(--primary-color)",
            color: "white",
        }
    } else {
        HoverStyle {
            transform: "scale(1)",
            background: "white",
            color: "var(--primary-color)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_switches_past_threshold() {
        assert_eq!(navbar_style(100.0, 100.0).box_shadow, "none");
        assert_eq!(navbar_style(101.0, 100.0).background, NAVBAR_BG_SCROLLED);
    }

    #[test]
    fn parallax_moves_against_scroll() {
        assert_eq!(parallax_offset(200.0, Some("0.5")), -100.0);
        assert_eq!(parallax_transform(200.0, Some("0.5")), "translateY(-100px)");
        assert_eq!(parallax_offset(200.0, None), 0.0);
        assert_eq!(parallax_offset(200.0, Some("fast")), 0.0);
    }

    #[test]
    fn typewriter_handles_multibyte_text() {
        let mut t = Typewriter::new("Dév");
        assert_eq!(t.advance().as_deref(), Some("D"));
        assert_eq!(t.advance().as_deref(), Some("Dé"));
        assert_eq!(t.advance().as_deref(), Some("Dév"));
        assert!(t.is_done());
        assert_eq!(t.advance(), None);
    }

    #[test]
    fn placeholder_links() {
        let page = "https://example.dev/";
        assert!(is_placeholder_link("#", page));
        assert!(is_placeholder_link("https://example.dev/#", page));
        assert!(!is_placeholder_link("https://github.com/x", page));
    }
}
