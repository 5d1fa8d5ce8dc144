//! Theme persistence in `config.toml` and terminal background detection.

use std::path::PathBuf;

use anyhow::Result;
use cinecat_core::theme::{Theme, ThemeStore};

use super::config::AppConfig;

/// Stores the theme under `[ui] theme` in the config file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Creates a store backed by the config file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        Ok(AppConfig::load(&self.path)?.ui.theme)
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        let mut config = AppConfig::load(&self.path)?;
        config.ui.theme = Some(theme);
        config.save(&self.path)
    }
}

/// Reads the terminal's background preference from `COLORFGBG`.
///
/// Returns `None` when the variable is unset or unparsable.
#[must_use]
pub fn system_prefers_dark() -> Option<bool> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
}

/// Interprets a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background colors 0-6 and 8 are dark; 7 and 9-15 are light.
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinecat_core::theme::ThemePreference;

    use super::*;

    #[test]
    fn test_parse_colorfgbg() {
        // Arrange & Act & Assert
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("default;default"), None);
        assert_eq!(parse_colorfgbg("7;200"), None);
    }

    #[test]
    fn test_store_roundtrip_keeps_file_valid() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut store = FileThemeStore::new(path.clone());

        // Act
        let before = store.load().unwrap();
        store.save(Theme::Light).unwrap();
        let after = store.load().unwrap();

        // Assert
        assert_eq!(before, None);
        assert_eq!(after, Some(Theme::Light));
        assert_eq!(AppConfig::load(&path).unwrap().ui.theme, Some(Theme::Light));
    }

    #[test]
    fn test_preference_toggle_persists_to_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut pref = ThemePreference::init(FileThemeStore::new(path.clone()), Some(true));

        // Act
        pref.toggle().unwrap();
        let reopened = ThemePreference::init(FileThemeStore::new(path), Some(true));

        // Assert
        assert_eq!(reopened.theme(), Theme::Light);
    }
}
