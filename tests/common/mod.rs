//! Common test utilities for integration tests
//!
//! Provides shared fixtures and mock fetchers used across multiple
//! integration test files.

use async_trait::async_trait;
use paramlayer::adapters::registry::FigmentRegistry;
use paramlayer::{ConfigurationLoader, FetchError, LoaderOptions, SourceFetcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fetcher returning a fixed response and counting calls.
///
/// The response can be swapped between calls to script retry scenarios.
pub struct CountingFetcher {
    response: Mutex<Result<Vec<u8>, FetchError>>,
    calls: AtomicUsize,
    delay: Duration,
}

#[allow(dead_code)]
impl CountingFetcher {
    pub fn new(payload: &str) -> Arc<Self> {
        Self::with_delay(payload, Duration::ZERO)
    }

    /// Sleep before answering, to widen cold-start races.
    pub fn with_delay(payload: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(payload.as_bytes().to_vec())),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn failing(error: FetchError, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn set_payload(&self, payload: &str) {
        *self.response.lock().unwrap() = Ok(payload.as_bytes().to_vec());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceFetcher for CountingFetcher {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Loader over a fresh figment registry with the given required keys.
#[allow(dead_code)]
pub fn loader_with(fetcher: Arc<CountingFetcher>, required_keys: &[&str]) -> ConfigurationLoader {
    let options = LoaderOptions {
        required_keys: required_keys.iter().map(ToString::to_string).collect(),
        ..LoaderOptions::default()
    };
    ConfigurationLoader::new(fetcher, Arc::new(FigmentRegistry::new()), options)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
