//! Local file fetcher, for development without a parameter store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ports::{FetchError, SourceFetcher};

/// Reads the payload from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SourceFetcher for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FetchError> {
        tokio::fs::read(&self.path).await.map_err(|e| FetchError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}
