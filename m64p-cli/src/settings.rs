//! User settings (`~/.config/m64p-catalog/settings.toml`).
//!
//! ```toml
//! [banner]
//! product = "Mupen64Plus Rom Catalog"
//! generator = "Generated by mupen64plus-ini-creator"
//! author = "Script coded by: narann"
//! ```
//!
//! Every key is optional; missing keys keep the built-in banner text.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use m64p_ini::Banner;

use crate::error::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub banner: BannerSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BannerSettings {
    pub product: Option<String>,
    pub generator: Option<String>,
    pub author: Option<String>,
}

impl Settings {
    /// The catalog banner with overrides applied.
    pub fn banner(&self) -> Banner {
        let defaults = Banner::default();
        Banner {
            product: self.banner.product.clone().unwrap_or(defaults.product),
            generator: self.banner.generator.clone().unwrap_or(defaults.generator),
            author: self.banner.author.clone().unwrap_or(defaults.author),
        }
    }
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("m64p-catalog").join("settings.toml")
}

/// Resolve the settings path: CLI override first, then the canonical location.
pub(crate) fn resolve_settings_path(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override.unwrap_or_else(settings_path)
}

/// Load settings from `path`. A missing file yields the defaults.
pub(crate) fn load_settings(path: &Path) -> Result<Settings, CliError> {
    if !path.exists() {
        log::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path)?;
    parse_settings(&contents)
        .map_err(|e| CliError::config(format!("{}: {e}", path.display())))
}

fn parse_settings(contents: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
