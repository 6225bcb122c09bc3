pub const FOLLOWER_DAMPING: f64 = 0.1;
pub const FOLLOWER_RADIUS: f64 = 20.0;
pub const PARALLAX_RATE: f64 = -0.3;
pub const PARALLAX_SPEED_STEP: f64 = 0.1;
pub const MAGNETIC_STRENGTH: f64 = 0.1;
pub const KEYBOARD_NAVIGATION_CLASS: &str = "keyboard-navigation";
pub const HOVER_TARGET_SELECTOR: &str = "a, button, .project-card, .skill-card, .contact-item";
pub const MAGNETIC_SELECTOR: &str = ".btn, .social-link";
pub const ORB_SELECTOR: &str = ".orb";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Trailing ring behind the pointer; one `step` per animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorFollower {
    position: Point,
}

impl CursorFollower {
    pub fn step(&mut self, pointer: Point) -> Point {
        self.position.x += (pointer.x - self.position.x) * FOLLOWER_DAMPING;
        self.position.y += (pointer.y - self.position.y) * FOLLOWER_DAMPING;
        self.position
    }

    /// Top-left corner for a ring centered on the follower.
    pub fn origin(&self) -> Point {
        Point {
            x: self.position.x - FOLLOWER_RADIUS,
            y: self.position.y - FOLLOWER_RADIUS,
        }
    }
}

pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    let speed = (index as f64 + 1.0) * PARALLAX_SPEED_STEP;
    scroll_y * PARALLAX_RATE * speed
}

pub fn magnetic_offset(pointer: Point, bounds: Rect) -> Point {
    Point {
        x: (pointer.x - bounds.left - bounds.width / 2.0) * MAGNETIC_STRENGTH,
        y: (pointer.y - bounds.top - bounds.height / 2.0) * MAGNETIC_STRENGTH,
    }
}

/// Scroll position as a percentage in `[0, 100]`; pages that fit the viewport
/// report 0.
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_top.is_finite() {
        return 0.0;
    }

    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardMode {
    active: bool,
}

impl KeyboardMode {
    pub fn is_active(self) -> bool {
        self.active
    }

    /// Returns `true` when the mode flipped on.
    pub fn on_key(&mut self, key: &str) -> bool {
        let flipped = key == "Tab" && !self.active;
        if key == "Tab" {
            self.active = true;
        }
        flipped
    }

    /// Returns `true` when the mode flipped off.
    pub fn on_pointer_down(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn follower_closes_a_tenth_of_the_gap() {
        let mut follower = CursorFollower::default();
        let pointer = Point { x: 100.0, y: 50.0 };

        let first = follower.step(pointer);
        assert!(close(first.x, 10.0) && close(first.y, 5.0));

        let second = follower.step(pointer);
        assert!(close(second.x, 19.0) && close(second.y, 9.5));

        let origin = follower.origin();
        assert!(close(origin.x, -1.0) && close(origin.y, -10.5));
    }

    #[test]
    fn follower_converges_on_a_still_pointer() {
        let mut follower = CursorFollower::default();
        let pointer = Point { x: 640.0, y: 360.0 };

        for _ in 0..300 {
            follower.step(pointer);
        }
        let settled = follower.step(pointer);

        assert!((settled.x - 640.0).abs() < 0.01);
        assert!((settled.y - 360.0).abs() < 0.01);
    }

    #[test]
    fn parallax_scales_with_index() {
        assert!(close(parallax_offset(0.0, 3), 0.0));
        assert!(close(parallax_offset(100.0, 0), -3.0));
        assert!(close(parallax_offset(100.0, 2), -9.0));
    }

    #[test]
    fn magnetic_offset_pulls_toward_pointer() {
        let bounds = Rect {
            left: 100.0,
            top: 200.0,
            width: 80.0,
            height: 40.0,
        };

        let centered = magnetic_offset(Point { x: 140.0, y: 220.0 }, bounds);
        assert!(close(centered.x, 0.0) && close(centered.y, 0.0));

        let corner = magnetic_offset(Point { x: 180.0, y: 200.0 }, bounds);
        assert!(close(corner.x, 4.0) && close(corner.y, -2.0));
    }

    #[test]
    fn scroll_progress_spans_zero_to_hundred() {
        assert_eq!(scroll_progress(0.0, 3_000.0, 1_000.0), 0.0);
        assert_eq!(scroll_progress(2_000.0, 3_000.0, 1_000.0), 100.0);
        assert!(close(scroll_progress(500.0, 3_000.0, 1_000.0), 25.0));
    }

    #[test]
    fn scroll_progress_is_clamped() {
        assert_eq!(scroll_progress(-40.0, 3_000.0, 1_000.0), 0.0);
        assert_eq!(scroll_progress(2_500.0, 3_000.0, 1_000.0), 100.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn tab_enters_and_pointer_leaves_keyboard_mode() {
        let mut mode = KeyboardMode::default();

        assert!(!mode.on_key("Enter"));
        assert!(!mode.is_active());

        assert!(mode.on_key("Tab"));
        assert!(!mode.on_key("Tab"));
        assert!(mode.is_active());

        assert!(mode.on_pointer_down());
        assert!(!mode.on_pointer_down());
        assert!(!mode.is_active());
    }
}
