//! Fixed-payload fetcher.

use async_trait::async_trait;

use crate::domain::ports::{FetchError, SourceFetcher};

/// Payload served when no remote endpoint is configured.
pub const PLACEHOLDER_PAYLOAD: &str = r#"{
"MCA_DOWNSTREAM_URL" : "<Some URL>",
"MCA_DOWNSTREAM_TIMEZONE" : "<Some Timezone>"
}"#;

/// Serves the same payload on every fetch.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Vec<u8>,
}

impl StaticSource {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Source serving the placeholder downstream settings.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_PAYLOAD)
    }
}

#[async_trait]
impl SourceFetcher for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FetchError> {
        Ok(self.payload.clone())
    }
}
