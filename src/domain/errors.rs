//! Domain errors for the parameter layer loader.

use std::sync::Arc;

use thiserror::Error;

use super::ports::errors::FetchError;

/// Format a key list as a human-readable string: `A, B, C`.
fn format_key_list(keys: &[String]) -> String {
    keys.join(", ")
}

/// Errors raised while decoding a raw payload from the parameter store.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Malformed payload: {0}")]
    Malformed(Arc<serde_json::Error>),

    #[error("Payload must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(Arc::new(err))
    }
}

/// Required keys that were not resolvable through the registry after merge.
///
/// Always carries every missing key, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The following required properties are missing: {}", format_key_list(&self.missing))]
pub struct VerificationError {
    pub missing: Vec<String>,
}

/// Outcome of a failed load attempt, shared by every caller joined on it.
#[derive(Debug, Clone, Error)]
pub enum LoadFailure {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

/// Errors returned by the configuration loader.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The payload could not be fetched or decoded.
    #[error("Error loading configuration from parameter store{}: {source}", describe_key(.key))]
    Load {
        /// Key being resolved when the load was triggered, `None` for bulk reads.
        key: Option<String>,
        #[source]
        source: LoadFailure,
    },

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),
}

fn describe_key(key: &Option<String>) -> String {
    key.as_ref()
        .map(|k| format!(" for key: {k}"))
        .unwrap_or_default()
}

impl ConfigError {
    /// Attach the requested key to a failed load.
    pub(crate) fn from_failure(failure: LoadFailure, key: Option<&str>) -> Self {
        match failure {
            LoadFailure::Verification(err) => Self::Verification(err),
            source => Self::Load {
                key: key.map(ToString::to_string),
                source,
            },
        }
    }

    /// Stable machine-readable code, used by the HTTP surface.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD_ERROR",
            Self::Verification(_) => "VERIFICATION_ERROR",
            Self::KeyNotFound(_) => "NOT_FOUND",
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_error_lists_all_keys() {
        let err = VerificationError {
            missing: vec!["B".to_string(), "C".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "The following required properties are missing: B, C"
        );
    }

    #[test]
    fn test_fetch_failure_keeps_requested_key() {
        let failure = LoadFailure::Fetch(FetchError::Transport("connection refused".into()));
        let err = ConfigError::from_failure(failure, Some("MCA_DOWNSTREAM_URL"));

        match &err {
            ConfigError::Load { key, source } => {
                assert_eq!(key.as_deref(), Some("MCA_DOWNSTREAM_URL"));
                assert!(matches!(source, LoadFailure::Fetch(_)));
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
        assert!(err.to_string().contains("for key: MCA_DOWNSTREAM_URL"));
        assert_eq!(err.code(), "LOAD_ERROR");
    }

    #[test]
    fn test_verification_failure_is_not_a_load_error() {
        let failure = LoadFailure::Verification(VerificationError {
            missing: vec!["C".to_string()],
        });
        let err = ConfigError::from_failure(failure, None);
        assert!(matches!(err, ConfigError::Verification(ref v) if v.missing == ["C"]));
        assert_eq!(err.code(), "VERIFICATION_ERROR");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DecodeError::from(serde_err);
        assert!(err.to_string().starts_with("Malformed payload"));
    }
}
