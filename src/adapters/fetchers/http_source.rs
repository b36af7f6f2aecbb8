//! HTTP parameter store fetcher.
//!
//! Issues `GET {endpoint}?path={path}` and returns the response body as the
//! raw payload. The store is expected to answer with the JSON object itself;
//! no envelope is unwrapped and no retry is attempted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::domain::models::StoreConfig;
use crate::domain::ports::{FetchError, SourceFetcher};

/// Configuration for the HTTP parameter store fetcher.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the parameter store.
    pub endpoint: String,
    /// Parameter path sent as the `path` query parameter.
    pub path: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
}

impl HttpSourceConfig {
    pub fn from_store(endpoint: impl Into<String>, store: &StoreConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            path: store.path.clone(),
            token: store.token.clone(),
            timeout_secs: store.timeout_secs,
        }
    }
}

/// Fetches the payload from a parameter store over HTTP.
pub struct HttpSource {
    config: HttpSourceConfig,
    client: Arc<reqwest::Client>,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl SourceFetcher for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FetchError> {
        debug!(endpoint = %self.config.endpoint, path = %self.config.path, "fetching parameters");

        let mut request = self
            .client
            .get(&self.config.endpoint)
            .query(&[("path", self.config.path.as_str())])
            .header("Accept", "application/json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            warn!("Parameter store error ({}): {}", status, body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Denied {
                    status: status.as_u16(),
                    body,
                },
                _ => FetchError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
