use serde::{Deserialize, Serialize};

use super::snapshot::DEFAULT_LAYER_NAME;

/// Host settings for the parameter layer service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Parameter store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP read endpoint configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameter store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Path or identifier of the parameter in the remote store
    #[serde(default)]
    pub path: String,

    /// Human-readable description of this configuration source
    #[serde(default = "default_description")]
    pub description: String,

    /// Base URL of the parameter store; when unset the placeholder payload is served
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token sent to the parameter store
    #[serde(default)]
    pub token: Option<String>,

    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Read the payload from a local JSON file instead of the remote store
    #[serde(default)]
    pub file: Option<String>,

    /// Keys that must resolve after merge, in addition to the payload's own keys
    #[serde(default)]
    pub required_keys: Vec<String>,

    /// Name of the layer merged into the environment registry
    #[serde(default = "default_layer_name")]
    pub layer_name: String,
}

fn default_description() -> String {
    "AWS Configuration Client".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_layer_name() -> String {
    DEFAULT_LAYER_NAME.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            description: default_description(),
            endpoint: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            file: None,
            required_keys: vec![],
            layer_name: default_layer_name(),
        }
    }
}

/// HTTP read endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_enable_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Log file rotation: daily, hourly or never
    #[serde(default = "default_log_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_log_rotation(),
        }
    }
}
