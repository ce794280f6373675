//! Settings store: theme preference and the derived dark-mode state.

use std::sync::Arc;

use promptdeck_storage::Storage;

use crate::error::StoreError;
use crate::types::Theme;

/// Persisted key holding the theme name as a raw string.
pub const THEME_KEY: &str = "theme";

/// Environment variable consulted by [`EnvSchemeSource`].
pub const COLOR_SCHEME_ENV: &str = "PROMPTDECK_COLOR_SCHEME";

/// Reports the environment's current color-scheme preference.
///
/// The headless stand-in for a desktop's `prefers-color-scheme` signal;
/// injected so tests and embedders can supply their own.
pub trait ColorSchemeSource: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// Reads the preference from the `PROMPTDECK_COLOR_SCHEME` environment
/// variable: `dark` means dark, anything else (or unset) means light.
#[derive(Default)]
pub struct EnvSchemeSource;

impl ColorSchemeSource for EnvSchemeSource {
    fn prefers_dark(&self) -> bool {
        std::env::var(COLOR_SCHEME_ENV)
            .map(|v| v.eq_ignore_ascii_case("dark"))
            .unwrap_or(false)
    }
}

/// Owns the theme preference and is the sole writer of the `theme` key.
///
/// Applying a theme recomputes `is_dark_mode` and the display theme. Under
/// `Theme::System` both are resolved through the injected scheme source.
pub struct SettingsStore {
    storage: Arc<dyn Storage>,
    scheme: Box<dyn ColorSchemeSource>,
    theme: Theme,
    is_dark_mode: bool,
    display_theme: &'static str,
}

impl SettingsStore {
    /// Read the persisted theme (default `system`) and apply it.
    ///
    /// An unrecognized persisted value falls back to `system` rather than
    /// failing the load.
    pub fn open(
        storage: Arc<dyn Storage>,
        scheme: Box<dyn ColorSchemeSource>,
    ) -> Result<Self, StoreError> {
        let theme = storage
            .get(THEME_KEY)?
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default();

        let mut store = Self {
            storage,
            scheme,
            theme,
            is_dark_mode: false,
            display_theme: "light",
        };
        store.apply();
        Ok(store)
    }

    /// The stored preference.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the applied theme resolved to dark.
    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    /// The applied display theme: the literal theme name, or the resolved
    /// `dark`/`light` when the preference is `system`.
    pub fn display_theme(&self) -> &'static str {
        self.display_theme
    }

    /// Persist a new theme preference, then apply it.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme = theme;
        self.storage.set(THEME_KEY, theme.as_str())?;
        self.apply();
        Ok(())
    }

    /// Re-derive dark/light state after the environment's color scheme
    /// changed. A no-op unless the preference is `system`.
    pub fn system_scheme_changed(&mut self) {
        if self.theme == Theme::System {
            self.apply();
        }
    }

    fn apply(&mut self) {
        match self.theme {
            Theme::System => {
                let dark = self.scheme.prefers_dark();
                self.is_dark_mode = dark;
                self.display_theme = if dark { "dark" } else { "light" };
            }
            theme => {
                self.is_dark_mode = theme == Theme::Dark;
                self.display_theme = theme.as_str();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck_storage::MemoryStorage;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Scheme source whose preference can be flipped mid-test.
    struct FlippableScheme(Arc<AtomicBool>);

    impl ColorSchemeSource for FlippableScheme {
        fn prefers_dark(&self) -> bool {
            self.0.load(Ordering::Relaxed)
        }
    }

    fn open_with(dark: Arc<AtomicBool>, storage: Arc<MemoryStorage>) -> SettingsStore {
        SettingsStore::open(storage, Box::new(FlippableScheme(dark))).unwrap()
    }

    #[test]
    fn test_defaults_to_system_theme() {
        let store = open_with(Arc::new(AtomicBool::new(false)), Arc::new(MemoryStorage::new()));
        assert_eq!(store.theme(), Theme::System);
        assert!(!store.is_dark_mode());
        assert_eq!(store.display_theme(), "light");
    }

    #[test]
    fn test_system_theme_follows_scheme_source() {
        let store = open_with(Arc::new(AtomicBool::new(true)), Arc::new(MemoryStorage::new()));
        assert!(store.is_dark_mode());
        assert_eq!(store.display_theme(), "dark");
    }

    #[test]
    fn test_set_theme_persists_and_applies() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = open_with(Arc::new(AtomicBool::new(false)), storage.clone());

        store.set_theme(Theme::Dark).unwrap();
        assert!(store.is_dark_mode());
        assert_eq!(store.display_theme(), "dark");

        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        // Reopen picks the persisted theme back up
        let reopened = open_with(Arc::new(AtomicBool::new(false)), storage);
        assert_eq!(reopened.theme(), Theme::Dark);
        assert!(reopened.is_dark_mode());
    }

    #[test]
    fn test_scheme_change_rederives_under_system() {
        let dark = Arc::new(AtomicBool::new(false));
        let mut store = open_with(dark.clone(), Arc::new(MemoryStorage::new()));
        assert!(!store.is_dark_mode());

        dark.store(true, Ordering::Relaxed);
        store.system_scheme_changed();
        assert!(store.is_dark_mode());
        assert_eq!(store.display_theme(), "dark");
    }

    #[test]
    fn test_scheme_change_ignored_for_literal_theme() {
        let dark = Arc::new(AtomicBool::new(false));
        let storage = Arc::new(MemoryStorage::new());
        let mut store = open_with(dark.clone(), storage);
        store.set_theme(Theme::Light).unwrap();

        dark.store(true, Ordering::Relaxed);
        store.system_scheme_changed();
        assert!(!store.is_dark_mode());
        assert_eq!(store.display_theme(), "light");
    }

    #[test]
    fn test_unrecognized_persisted_theme_falls_back() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(THEME_KEY, "solarized").unwrap();

        let store = open_with(Arc::new(AtomicBool::new(false)), storage);
        assert_eq!(store.theme(), Theme::System);
    }
}
