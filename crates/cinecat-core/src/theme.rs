//! Light/dark theme preference.
//!
//! [`ThemePreference`] is created once at startup from the persisted value
//! (or the system preference), handed to whatever renders, and writes every
//! toggle back through its [`ThemeStore`].

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Persisted name (`"light"` / `"dark"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => bail!("unknown theme: {other}"),
        }
    }
}

/// Persistence backend for the theme preference.
pub trait ThemeStore {
    /// Reads the persisted theme, `None` if never stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<Theme>>;

    /// Persists `theme`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, theme: Theme) -> Result<()>;
}

/// Current theme plus the store it is persisted to.
#[derive(Debug)]
pub struct ThemePreference<S> {
    theme: Theme,
    store: S,
}

impl<S: ThemeStore> ThemePreference<S> {
    /// Resolves the initial theme: persisted value, else the system
    /// preference, else dark.
    ///
    /// An unreadable store is logged and treated as empty.
    pub fn init(store: S, system_prefers_dark: Option<bool>) -> Self {
        let stored = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to read theme preference");
            None
        });
        let theme = stored.unwrap_or(match system_prefers_dark {
            Some(false) => Theme::Light,
            Some(true) | None => Theme::Dark,
        });
        Self { theme, store }
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists the new value.
    ///
    /// The in-memory theme changes even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.store.save(self.theme)?;
        Ok(self.theme)
    }

    /// Backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::anyhow;

    use super::*;

    #[derive(Debug, Default)]
    struct MemoryStore {
        value: Option<Theme>,
        saves: Vec<Theme>,
        broken: bool,
    }

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Result<Option<Theme>> {
            if self.broken {
                return Err(anyhow!("disk on fire"));
            }
            Ok(self.value)
        }

        fn save(&mut self, theme: Theme) -> Result<()> {
            if self.broken {
                return Err(anyhow!("disk on fire"));
            }
            self.value = Some(theme);
            self.saves.push(theme);
            Ok(())
        }
    }

    #[test]
    fn test_persisted_value_wins() {
        // Arrange
        let store = MemoryStore {
            value: Some(Theme::Light),
            ..MemoryStore::default()
        };

        // Act
        let pref = ThemePreference::init(store, Some(true));

        // Assert
        assert_eq!(pref.theme(), Theme::Light);
    }

    #[test]
    fn test_system_preference_without_persisted_value() {
        // Arrange & Act
        let light = ThemePreference::init(MemoryStore::default(), Some(false));
        let dark = ThemePreference::init(MemoryStore::default(), Some(true));
        let unknown = ThemePreference::init(MemoryStore::default(), None);

        // Assert
        assert_eq!(light.theme(), Theme::Light);
        assert_eq!(dark.theme(), Theme::Dark);
        assert_eq!(unknown.theme(), Theme::Dark);
    }

    #[test]
    fn test_unreadable_store_falls_back_to_system() {
        // Arrange
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };

        // Act
        let pref = ThemePreference::init(store, Some(false));

        // Assert
        assert_eq!(pref.theme(), Theme::Light);
    }

    #[test]
    fn test_every_toggle_is_persisted() {
        // Arrange
        let mut pref = ThemePreference::init(MemoryStore::default(), Some(true));

        // Act
        let first = pref.toggle().unwrap();
        let second = pref.toggle().unwrap();

        // Assert
        assert_eq!(first, Theme::Light);
        assert_eq!(second, Theme::Dark);
        assert_eq!(pref.store().saves, vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn test_failed_save_still_toggles() {
        // Arrange
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let mut pref = ThemePreference::init(store, None);

        // Act
        let result = pref.toggle();

        // Assert
        assert!(result.is_err());
        assert_eq!(pref.theme(), Theme::Light);
    }

    #[test]
    fn test_parse_and_display() {
        // Arrange & Act & Assert
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert!("sepia".parse::<Theme>().is_err());
    }
}
