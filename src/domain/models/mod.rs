pub mod settings;
pub mod snapshot;

pub use settings::{HttpConfig, LoggingConfig, Settings, StoreConfig};
pub use snapshot::{ConfigSnapshot, ConfigValue, NamedLayer, DEFAULT_LAYER_NAME};
