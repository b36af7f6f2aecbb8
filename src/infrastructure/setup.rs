//! Service wiring and project initialization
//!
//! Builds the loader from settings:
//! - Settings extraction and validation
//! - Fetcher selection
//! - Environment registry layered over the settings figment
//!
//! Also writes the default settings file for `paramlayer init`.

use anyhow::{Context, Result};
use figment::Figment;
use std::path::Path;
use std::sync::Arc;

use crate::adapters::fetchers;
use crate::adapters::registry::FigmentRegistry;
use crate::domain::models::Settings;
use crate::infrastructure::config::SettingsLoader;
use crate::services::{ConfigurationLoader, LoaderOptions};

/// Default settings template content
pub const DEFAULT_SETTINGS_TEMPLATE: &str = r#"# Paramlayer settings
# Override settings by editing this file or setting environment variables
# with PARAMLAYER_ prefix
#
# Example environment variables:
#   export PARAMLAYER_STORE__PATH=/my-service/prod
#   export PARAMLAYER_STORE__ENDPOINT=https://parameters.internal/v1/parameters
#   export PARAMLAYER_HTTP__PORT=9090
#   export PARAMLAYER_LOGGING__LEVEL=debug

store:
  # Path of the parameter in the remote store (required)
  path: "/my-service/config"

  # Human-readable description of this configuration source
  description: "AWS Configuration Client"

  # Parameter store base URL; the placeholder payload is served when unset
  # endpoint: "https://parameters.internal/v1/parameters"

  # Read the payload from a local JSON file instead
  # file: "parameters.json"

  # Keys that must resolve after merge, besides the payload's own keys
  required_keys: []

  # Layer name the parameters are merged under
  layer_name: "aws-env"

# HTTP read endpoint
http:
  host: "127.0.0.1"
  port: 8080
  enable_cors: true

# Logging configuration
logging:
  # Log level: trace, debug, info, warn, error
  level: "info"

  # Log format: json, pretty
  format: "json"

  # Directory for rolling log files (stdout only when unset)
  # log_dir: "logs"

  # Log file rotation: daily, hourly, never
  rotation: "daily"
"#;

/// Fully wired service: settings plus the loader built from them.
pub struct Application {
    pub settings: Settings,
    pub loader: ConfigurationLoader,
}

impl Application {
    /// Wire the loader from a settings figment.
    ///
    /// The figment also becomes the registry base, so parameter store keys
    /// are layered over the host's own settings.
    pub fn build(figment: Figment) -> Result<Self> {
        let settings = SettingsLoader::extract(&figment)?;
        let fetcher = fetchers::from_store_config(&settings.store)
            .context("Failed to create parameter store fetcher")?;
        let registry = Arc::new(FigmentRegistry::with_base(figment));
        let loader =
            ConfigurationLoader::new(fetcher, registry, LoaderOptions::from(&settings.store));

        Ok(Self { settings, loader })
    }
}

/// Write the default settings file, refusing to overwrite unless `force`.
pub fn write_default_settings(path: impl AsRef<Path>, force: bool) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Ok(false);
    }
    std::fs::write(path, DEFAULT_SETTINGS_TEMPLATE)
        .with_context(|| format!("Failed to write settings file {}", path.display()))?;
    Ok(true)
}
