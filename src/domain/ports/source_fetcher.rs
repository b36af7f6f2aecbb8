//! Source fetcher port for the remote parameter store.
//!
//! A fetcher returns the raw serialized key-value payload and nothing else:
//! no parsing, no retry. Decoding and verification happen in the loader.

use async_trait::async_trait;

use super::errors::FetchError;

/// Opaque capability returning the raw payload from a parameter store.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Short adapter name (e.g., "http", "file", "static"), used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the raw payload bytes.
    async fn fetch_raw(&self) -> Result<Vec<u8>, FetchError>;
}
