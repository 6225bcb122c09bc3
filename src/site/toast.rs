pub const TOAST_DISPLAY_MS: u64 = 4_000;
pub const TOAST_EXIT_MS: u64 = 300;
pub const TOAST_HIDDEN_TRANSFORM: &str = "translateX(400px)";
pub const TOAST_SHOWN_TRANSFORM: &str = "translateX(0)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check",
            Self::Error => "fas fa-exclamation-triangle",
            Self::Info => "fas fa-info-circle",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "var(--gradient-primary)",
            Self::Error => "var(--gradient-secondary)",
            Self::Info => "var(--accent)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
    dismiss_at: Option<u64>,
    remove_at: Option<u64>,
}

impl Toast {
    pub fn class(&self) -> String {
        format!("notification notification-{}", self.severity.as_str())
    }

    pub fn transform(&self) -> &'static str {
        match self.phase {
            ToastPhase::Shown => TOAST_SHOWN_TRANSFORM,
            ToastPhase::Entering | ToastPhase::Leaving => TOAST_HIDDEN_TRANSFORM,
        }
    }

    /// Inline box styles so a toast is placed without any stylesheet.
    pub fn style(&self) -> String {
        format!(
            "position: fixed; top: 100px; right: 2rem; background: {}; color: var(--dark); \
             padding: 1rem 1.5rem; border-radius: 12px; \
             box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.8); z-index: 10001; \
             transform: {}; transition: transform 0.3s ease; font-weight: 600; max-width: 300px;",
            self.severity.background(),
            self.transform()
        )
    }

    fn begin_exit(&mut self, at: u64) {
        self.phase = ToastPhase::Leaving;
        self.dismiss_at = None;
        self.remove_at = Some(at.saturating_add(TOAST_EXIT_MS));
    }
}

/// Live toasts, driven by wall-clock milliseconds supplied by the host.
///
/// The host arms a single timer for [`ToastStack::next_deadline`] and calls
/// [`ToastStack::advance`] when it fires.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStack {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[cfg(test)]
    pub fn contains(&self, id: ToastId) -> bool {
        self.toasts.iter().any(|toast| toast.id == id)
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: u64) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);

        self.toasts.push(Toast {
            id,
            message: message.into(),
            severity,
            phase: ToastPhase::Entering,
            dismiss_at: Some(now.saturating_add(TOAST_DISPLAY_MS)),
            remove_at: None,
        });
        id
    }

    /// Entry transform runs once the toast has been painted off-screen.
    pub fn settle(&mut self, id: ToastId) {
        if let Some(toast) = self.find_mut(id) {
            if toast.phase == ToastPhase::Entering {
                toast.phase = ToastPhase::Shown;
            }
        }
    }

    /// Click dismissal. Returns `false` when the toast is already on its way out.
    pub fn dismiss(&mut self, id: ToastId, now: u64) -> bool {
        match self.find_mut(id) {
            Some(toast) if toast.phase != ToastPhase::Leaving => {
                toast.begin_exit(now);
                true
            }
            _ => false,
        }
    }

    pub fn advance(&mut self, now: u64) -> Vec<ToastId> {
        for toast in &mut self.toasts {
            if let Some(deadline) = toast.dismiss_at.filter(|deadline| *deadline <= now) {
                toast.begin_exit(deadline);
            }
        }

        let mut removed = Vec::new();
        self.toasts.retain(|toast| {
            let due = toast.remove_at.is_some_and(|deadline| deadline <= now);
            if due {
                removed.push(toast.id);
            }
            !due
        });
        removed
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.toasts
            .iter()
            .filter_map(|toast| toast.remove_at.or(toast.dismiss_at))
            .min()
    }

    fn find_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_toast_leaves_after_display_and_exit() {
        let mut stack = ToastStack::default();
        let id = stack.show("Saved", Severity::Success, 0);
        stack.settle(id);

        assert!(stack.advance(3_999).is_empty());
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Shown);

        assert!(stack.advance(4_000).is_empty());
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Leaving);
        assert_eq!(stack.toasts()[0].transform(), TOAST_HIDDEN_TRANSFORM);

        assert!(stack.advance(4_299).is_empty());
        assert_eq!(stack.advance(4_300), vec![id]);
        assert!(!stack.contains(id));
    }

    #[test]
    fn late_tick_removes_in_one_pass() {
        let mut stack = ToastStack::default();
        let id = stack.show("Late", Severity::Info, 100);

        assert_eq!(stack.advance(10_000), vec![id]);
        assert!(stack.toasts().is_empty());
    }

    #[test]
    fn click_cancels_auto_dismiss() {
        let mut stack = ToastStack::default();
        let id = stack.show("Oops", Severity::Error, 0);
        stack.settle(id);

        assert!(stack.dismiss(id, 1_000));
        assert_eq!(stack.next_deadline(), Some(1_300));
        assert_eq!(stack.advance(1_300), vec![id]);

        assert!(stack.advance(4_000).is_empty());
        assert!(stack.advance(4_300).is_empty());
        assert_eq!(stack.next_deadline(), None);
    }

    #[test]
    fn second_dismiss_is_a_no_op() {
        let mut stack = ToastStack::default();
        let id = stack.show("Twice", Severity::Info, 0);

        assert!(stack.dismiss(id, 10));
        assert!(!stack.dismiss(id, 20));
        assert_eq!(stack.next_deadline(), Some(310));

        assert_eq!(stack.advance(310), vec![id]);
        assert!(!stack.dismiss(id, 400));
    }

    #[test]
    fn click_after_auto_exit_started_is_ignored() {
        let mut stack = ToastStack::default();
        let id = stack.show("Race", Severity::Info, 0);

        stack.advance(4_100);
        assert!(!stack.dismiss(id, 4_150));
        assert_eq!(stack.advance(4_300), vec![id]);
    }

    #[test]
    fn settle_only_moves_entering_toasts() {
        let mut stack = ToastStack::default();
        let id = stack.show("Hello", Severity::Info, 0);
        assert_eq!(stack.toasts()[0].transform(), TOAST_HIDDEN_TRANSFORM);

        stack.settle(id);
        assert_eq!(stack.toasts()[0].transform(), TOAST_SHOWN_TRANSFORM);

        stack.dismiss(id, 5);
        stack.settle(id);
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Leaving);
    }

    #[test]
    fn toasts_expire_independently() {
        let mut stack = ToastStack::default();
        let first = stack.show("one", Severity::Success, 0);
        let second = stack.show("two", Severity::Error, 1_000);

        assert_eq!(stack.next_deadline(), Some(4_000));
        assert_eq!(stack.advance(4_300), vec![first]);
        assert_eq!(stack.next_deadline(), Some(5_000));
        assert_eq!(stack.advance(5_300), vec![second]);
    }

    #[test]
    fn toast_is_pinned_to_the_viewport() {
        let mut stack = ToastStack::default();
        let id = stack.show("Pinned", Severity::Error, 0);

        let style = stack.toasts()[0].style();
        assert!(style.contains("position: fixed;"));
        assert!(style.contains("top: 100px;"));
        assert!(style.contains("right: 2rem;"));
        assert!(style.contains("z-index: 10001;"));
        assert!(style.contains("max-width: 300px;"));
        assert!(style.contains("background: var(--gradient-secondary);"));
        assert!(style.contains("transform: translateX(400px);"));

        stack.settle(id);
        assert!(stack.toasts()[0].style().contains("transform: translateX(0);"));
    }

    #[test]
    fn severity_styles() {
        let mut stack = ToastStack::default();
        stack.show("x", Severity::Success, 0);

        assert_eq!(stack.toasts()[0].class(), "notification notification-success");
        assert_eq!(Severity::Error.icon_class(), "fas fa-exclamation-triangle");
        assert_eq!(Severity::Info.background(), "var(--accent)");
    }
}
