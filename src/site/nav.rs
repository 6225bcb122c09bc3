pub const NAVBAR_SCROLLED_AFTER: f64 = 100.0;
pub const SECTION_ACTIVATION_OFFSET: f64 = 100.0;
pub const SMOOTH_SCROLL_OFFSET: f64 = 80.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER
}

/// Section whose band contains the scroll position; the later section wins
/// where bands overlap.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .filter(|section| {
            let top = section.offset_top - SECTION_ACTIVATION_OFFSET;
            scroll_y >= top && scroll_y < top + section.height
        })
        .last()
        .map(|section| section.id.as_str())
}

pub fn link_is_active(href: &str, active: Option<&str>) -> bool {
    match (href.strip_prefix('#'), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorAction<'a> {
    /// Bare `#`: swallow the click.
    Suppress,
    ScrollTo { id: &'a str },
    /// Not an in-page anchor; let the browser handle it.
    Follow,
}

pub fn anchor_action(href: &str) -> AnchorAction<'_> {
    match href.strip_prefix('#') {
        Some("") => AnchorAction::Suppress,
        Some(id) => AnchorAction::ScrollTo { id },
        None => AnchorAction::Follow,
    }
}

pub fn scroll_target(offset_top: f64) -> f64 {
    offset_top - SMOOTH_SCROLL_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        [("home", 0.0, 800.0), ("about", 800.0, 600.0), ("contact", 1_400.0, 500.0)]
            .into_iter()
            .map(|(id, offset_top, height)| SectionBounds {
                id: id.to_string(),
                offset_top,
                height,
            })
            .collect()
    }

    #[test]
    fn navbar_turns_solid_past_threshold() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(100.0));
        assert!(navbar_scrolled(101.0));
    }

    #[test]
    fn active_section_uses_shifted_bands() {
        let sections = sections();

        assert_eq!(active_section(0.0, &sections), Some("home"));
        assert_eq!(active_section(699.0, &sections), Some("home"));
        assert_eq!(active_section(700.0, &sections), Some("about"));
        assert_eq!(active_section(1_300.0, &sections), Some("contact"));
        assert_eq!(active_section(5_000.0, &sections), None);
    }

    #[test]
    fn links_match_active_section() {
        assert!(link_is_active("#about", Some("about")));
        assert!(!link_is_active("#home", Some("about")));
        assert!(!link_is_active("about", Some("about")));
        assert!(!link_is_active("#about", None));
    }

    #[test]
    fn anchors_are_classified() {
        assert_eq!(anchor_action("#"), AnchorAction::Suppress);
        assert_eq!(anchor_action("#projects"), AnchorAction::ScrollTo { id: "projects" });
        assert_eq!(anchor_action("/resume.pdf"), AnchorAction::Follow);
        assert_eq!(scroll_target(900.0), 820.0);
    }
}
