pub const THEME_KEY: &str = "portfolio-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    /// Icon class of the toggle button: the sun offers a way out of the dark.
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Dark => "fas fa-sun",
            Self::Light => "fas fa-moon",
        }
    }
}

pub trait ThemeStorage {
    fn read(&self, key: &str) -> Option<String>;
    /// Best effort; implementations swallow write failures.
    fn write(&self, key: &str, value: &str);
}

pub trait ThemeDisplay {
    fn reflect(&self, theme: Theme);
}

/// Single owner of the active theme.
///
/// Every change goes through [`ThemeState::set`], which persists first and
/// then reflects the value onto the display before returning, so readers never
/// see the two disagree.
pub struct ThemeState<S, D> {
    current: Theme,
    storage: S,
    display: D,
}

impl<S: ThemeStorage, D: ThemeDisplay> ThemeState<S, D> {
    pub fn load(storage: S, display: D) -> Self {
        let current = storage
            .read(THEME_KEY)
            .and_then(|value| Theme::from_str(&value))
            .unwrap_or_default();

        Self {
            current,
            storage,
            display,
        }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Pushes the current value onto the display without touching storage.
    pub fn apply(&self) {
        self.display.reflect(self.current);
    }

    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        self.storage.write(THEME_KEY, theme.as_str());
        self.display.reflect(theme);
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    #[derive(Clone, Default)]
    struct MemoryStorage(Rc<RefCell<HashMap<String, String>>>);

    impl ThemeStorage for MemoryStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    #[derive(Clone, Default)]
    struct RecordingDisplay(Rc<RefCell<Option<Theme>>>);

    impl ThemeDisplay for RecordingDisplay {
        fn reflect(&self, theme: Theme) {
            *self.0.borrow_mut() = Some(theme);
        }
    }

    fn stored(storage: &MemoryStorage) -> Option<String> {
        storage.0.borrow().get(THEME_KEY).cloned()
    }

    #[test]
    fn missing_value_falls_back_to_dark() {
        let state = ThemeState::load(MemoryStorage::default(), RecordingDisplay::default());
        assert_eq!(state.get(), Theme::Dark);
    }

    #[test]
    fn garbage_value_falls_back_to_dark() {
        let storage = MemoryStorage::default();
        storage.write(THEME_KEY, "sepia");

        let state = ThemeState::load(storage, RecordingDisplay::default());
        assert_eq!(state.get(), Theme::Dark);
    }

    #[test]
    fn stored_light_is_restored() {
        let storage = MemoryStorage::default();
        storage.write(THEME_KEY, "light");

        let state = ThemeState::load(storage, RecordingDisplay::default());
        assert_eq!(state.get(), Theme::Light);
    }

    #[test]
    fn set_persists_and_reflects_every_value() {
        for theme in [Theme::Dark, Theme::Light] {
            let storage = MemoryStorage::default();
            let display = RecordingDisplay::default();
            let mut state = ThemeState::load(storage.clone(), display.clone());

            state.set(theme);

            assert_eq!(state.get(), theme);
            assert_eq!(*display.0.borrow(), Some(theme));
            assert_eq!(stored(&storage).as_deref(), Some(theme.as_str()));
        }
    }

    #[test]
    fn toggle_flips_and_persists() {
        let storage = MemoryStorage::default();
        let display = RecordingDisplay::default();
        let mut state = ThemeState::load(storage.clone(), display.clone());

        assert_eq!(state.toggle(), Theme::Light);
        assert_eq!(stored(&storage).as_deref(), Some("light"));
        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(stored(&storage).as_deref(), Some("dark"));
        assert_eq!(*display.0.borrow(), Some(Theme::Dark));
    }

    #[test]
    fn apply_does_not_write_storage() {
        let storage = MemoryStorage::default();
        let display = RecordingDisplay::default();
        let state = ThemeState::load(storage.clone(), display.clone());

        state.apply();

        assert_eq!(*display.0.borrow(), Some(Theme::Dark));
        assert_eq!(stored(&storage), None);
    }

    #[test]
    fn icon_follows_theme() {
        assert_eq!(Theme::Dark.icon_class(), "fas fa-sun");
        assert_eq!(Theme::Light.icon_class(), "fas fa-moon");
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
    }
}
