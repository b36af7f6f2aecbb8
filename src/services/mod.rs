pub mod config_cache;
pub mod configuration_loader;
pub mod payload_decoder;
pub mod verifier;

pub use config_cache::ConfigCache;
pub use configuration_loader::{ConfigurationLoader, LoaderOptions};
