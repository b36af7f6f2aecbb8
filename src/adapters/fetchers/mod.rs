//! Source fetcher adapters.
//!
//! - `HttpSource`: remote parameter store over HTTP
//! - `FileSource`: local JSON file
//! - `StaticSource`: fixed payload, used when nothing else is configured

pub mod file_source;
pub mod http_source;
pub mod static_source;

use std::sync::Arc;

pub use file_source::FileSource;
pub use http_source::{HttpSource, HttpSourceConfig};
pub use static_source::StaticSource;

use crate::domain::models::StoreConfig;
use crate::domain::ports::{FetchError, SourceFetcher};

/// Pick a fetcher for the store configuration.
///
/// A configured file wins over an endpoint; with neither the placeholder
/// payload is served.
pub fn from_store_config(store: &StoreConfig) -> Result<Arc<dyn SourceFetcher>, FetchError> {
    if let Some(file) = &store.file {
        return Ok(Arc::new(FileSource::new(file)));
    }
    if let Some(endpoint) = &store.endpoint {
        let config = HttpSourceConfig::from_store(endpoint.clone(), store);
        return Ok(Arc::new(HttpSource::new(config)?));
    }
    Ok(Arc::new(StaticSource::placeholder()))
}
