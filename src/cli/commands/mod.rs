//! CLI command implementations.

pub mod init;
pub mod serve;
pub mod show;

use anyhow::Result;
use figment::Figment;
use std::path::Path;

use crate::infrastructure::config::SettingsLoader;

/// Settings figment for the `--config` option, or the project files.
pub fn settings_figment(config: Option<&Path>) -> Figment {
    match config {
        Some(path) => SettingsLoader::figment_from_file(path),
        None => SettingsLoader::figment(),
    }
}

/// Fail early with a readable message when the settings file is missing.
pub fn ensure_settings_file(config: Option<&Path>) -> Result<()> {
    if let Some(path) = config {
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
    }
    Ok(())
}
