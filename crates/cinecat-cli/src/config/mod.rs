//! Application configuration module.
//!
//! Manages the TOML config file holding user settings such as the
//! persisted theme.

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod theme;

pub use paths::resolve_config_path;
pub use theme::{FileThemeStore, system_prefers_dark};
