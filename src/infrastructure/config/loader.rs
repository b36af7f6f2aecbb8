use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Settings;

/// Project settings file, merged first.
pub const SETTINGS_FILE: &str = "paramlayer.yaml";

/// Local overrides, merged over the project settings file.
pub const LOCAL_SETTINGS_FILE: &str = "paramlayer.local.yaml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "PARAMLAYER_";

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Parameter store path cannot be empty (set store.path or PARAMLAYER_STORE__PATH)")]
    EmptyStorePath,

    #[error("Layer name cannot be empty")]
    EmptyLayerName,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid port: {0}. Must be non-zero")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Settings loader with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Figment holding the hierarchical settings sources
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. paramlayer.yaml (project settings)
    /// 3. paramlayer.local.yaml (local overrides, optional)
    /// 4. Environment variables (PARAMLAYER_* prefix, highest priority)
    ///
    /// The same figment is used as the base of the environment registry, so
    /// parameter store layers are merged over the host's own settings.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(SETTINGS_FILE))
            .merge(Yaml::file(LOCAL_SETTINGS_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Like [`SettingsLoader::figment`] with an explicit settings file in
    /// place of the project files.
    pub fn figment_from_file(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings with hierarchical merging
    pub fn load() -> Result<Settings> {
        Self::extract(&Self::figment())
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings> {
        let settings = Self::extract(&Self::figment_from_file(path.as_ref()))
            .with_context(|| format!("Failed to load settings from {}", path.as_ref().display()))?;
        Ok(settings)
    }

    /// Extract and validate settings from a figment
    pub fn extract(figment: &Figment) -> Result<Settings> {
        let settings: Settings = figment
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        if settings.store.path.trim().is_empty() {
            return Err(SettingsError::EmptyStorePath);
        }

        if settings.store.layer_name.trim().is_empty() {
            return Err(SettingsError::EmptyLayerName);
        }

        if settings.store.timeout_secs == 0 {
            return Err(SettingsError::InvalidTimeout(settings.store.timeout_secs));
        }

        if settings.http.port == 0 {
            return Err(SettingsError::InvalidPort(settings.http.port));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&settings.logging.level.as_str()) {
            return Err(SettingsError::InvalidLogLevel(settings.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&settings.logging.format.as_str()) {
            return Err(SettingsError::InvalidLogFormat(
                settings.logging.format.clone(),
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&settings.logging.rotation.as_str()) {
            return Err(SettingsError::InvalidLogRotation(
                settings.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
