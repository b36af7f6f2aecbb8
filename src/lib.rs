//! Paramlayer - parameter store configuration layer
//!
//! Paramlayer fetches a key-value payload from a remote parameter store,
//! merges it into a layered configuration registry under a fixed layer name,
//! verifies every required key resolves after the merge, and serves the
//! result from an in-process cache.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): snapshot models, errors and port traits
//! - **Service Layer** (`services`): decoder, verifier, cache and the loader
//! - **Adapters** (`adapters`): fetchers, the figment registry, the HTTP view
//! - **Infrastructure Layer** (`infrastructure`): settings, logging, wiring
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use paramlayer::adapters::{fetchers::StaticSource, registry::FigmentRegistry};
//! use paramlayer::services::{ConfigurationLoader, LoaderOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let loader = ConfigurationLoader::new(
//!         Arc::new(StaticSource::placeholder()),
//!         Arc::new(FigmentRegistry::new()),
//!         LoaderOptions::default(),
//!     );
//!     let url = loader.get("MCA_DOWNSTREAM_URL").await?;
//!     println!("{url}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigError, ConfigResult, DecodeError, LoadFailure, VerificationError};
pub use domain::models::{ConfigSnapshot, ConfigValue, NamedLayer, Settings, DEFAULT_LAYER_NAME};
pub use domain::ports::{EnvironmentRegistry, FetchError, SourceFetcher};
pub use infrastructure::config::{SettingsError, SettingsLoader};
pub use services::{ConfigurationLoader, LoaderOptions};
