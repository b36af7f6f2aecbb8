use thiserror::Error;

/// Parameter store fetch errors
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Parameter store unreachable: {0}")]
    Transport(String),

    #[error("Access to parameter store denied ({status}): {body}")]
    Denied { status: u16, body: String },

    #[error("Parameter store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read payload from {path}: {message}")]
    Io { path: String, message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
