pub const LOADING_DELAY_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingState {
    loading: bool,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { loading: true }
    }
}

impl LoadingState {
    pub fn is_loading(self) -> bool {
        self.loading
    }

    /// Page controls stay inert until the overlay lifts.
    pub fn accepts_input(self) -> bool {
        !self.loading
    }

    /// Returns `true` only for the call that ended the loading phase.
    pub fn finish(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }

    pub fn body_overflow(self) -> &'static str {
        if self.loading {
            "hidden"
        } else {
            "auto"
        }
    }

    pub fn overlay_class(self) -> &'static str {
        if self.loading {
            "loading"
        } else {
            "loading hidden"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_starts_locked_and_unlocks_once() {
        let mut state = LoadingState::default();
        assert!(state.is_loading());
        assert!(!state.accepts_input());
        assert_eq!(state.body_overflow(), "hidden");

        assert!(state.finish());
        assert!(!state.finish());
        assert_eq!(state.body_overflow(), "auto");
        assert_eq!(state.overlay_class(), "loading hidden");
        assert!(state.accepts_input());
    }
}
