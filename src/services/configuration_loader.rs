//! Lazy, single-flight configuration loader.
//!
//! The loader fetches the parameter store payload at most once per process
//! lifetime. The first caller that finds the cache empty starts the load
//! sequence:
//!
//! ```text
//! fetch -> decode -> registry add_layer -> refresh -> verify -> cache publish
//! ```
//!
//! Every caller that arrives while that sequence runs joins the same
//! in-flight future and observes the same outcome. A failed load publishes
//! nothing, removes its registry layer and clears the in-flight slot, so the
//! next call starts the whole sequence again. Once a snapshot is published
//! all reads are served from the cache without locking.

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, error, info, instrument};

use crate::domain::errors::{ConfigError, ConfigResult, LoadFailure};
use crate::domain::models::{ConfigSnapshot, ConfigValue, NamedLayer, StoreConfig, DEFAULT_LAYER_NAME};
use crate::domain::ports::{EnvironmentRegistry, SourceFetcher};
use crate::services::config_cache::ConfigCache;
use crate::services::{payload_decoder, verifier};

type LoadOutcome = Result<Arc<ConfigSnapshot>, LoadFailure>;

/// Options controlling how a loaded snapshot is merged and verified.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Name of the layer registered into the environment registry.
    pub layer_name: String,
    /// Human-readable description of this configuration source.
    pub description: String,
    /// Keys that must resolve after merge, in addition to the payload keys.
    pub required_keys: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            description: StoreConfig::default().description,
            required_keys: vec![],
        }
    }
}

impl From<&StoreConfig> for LoaderOptions {
    fn from(store: &StoreConfig) -> Self {
        Self {
            layer_name: store.layer_name.clone(),
            description: store.description.clone(),
            required_keys: store.required_keys.clone(),
        }
    }
}

struct InFlightLoad {
    generation: u64,
    load: Shared<BoxFuture<'static, LoadOutcome>>,
}

#[derive(Default)]
struct InFlightSlot {
    current: Option<InFlightLoad>,
    next_generation: u64,
}

struct LoaderInner {
    fetcher: Arc<dyn SourceFetcher>,
    registry: Arc<dyn EnvironmentRegistry>,
    cache: ConfigCache,
    options: LoaderOptions,
    in_flight: Mutex<InFlightSlot>,
}

/// Loads parameter store configuration on first use and serves it from cache.
///
/// Cheap to clone; clones share the same cache and in-flight load.
#[derive(Clone)]
pub struct ConfigurationLoader {
    inner: Arc<LoaderInner>,
}

impl ConfigurationLoader {
    pub fn new(
        fetcher: Arc<dyn SourceFetcher>,
        registry: Arc<dyn EnvironmentRegistry>,
        options: LoaderOptions,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                fetcher,
                registry,
                cache: ConfigCache::new(),
                options,
                in_flight: Mutex::new(InFlightSlot::default()),
            }),
        }
    }

    /// Value for `key`, loading the snapshot first if the cache is empty.
    ///
    /// A key missing from a loaded snapshot is `KeyNotFound`; it never
    /// triggers a reload.
    pub async fn get(&self, key: &str) -> ConfigResult<ConfigValue> {
        let snapshot = self.ensure_loaded(Some(key)).await?;
        snapshot
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    /// The full snapshot, loading it first if the cache is empty.
    pub async fn get_all(&self) -> ConfigResult<Arc<ConfigSnapshot>> {
        self.ensure_loaded(None).await
    }

    /// The snapshot as the named layer registered into the registry.
    pub async fn layer(&self) -> ConfigResult<NamedLayer> {
        let snapshot = self.get_all().await?;
        Ok(NamedLayer::new(&self.inner.options.layer_name, snapshot))
    }

    pub fn layer_name(&self) -> &str {
        &self.inner.options.layer_name
    }

    pub fn description(&self) -> &str {
        &self.inner.options.description
    }

    pub fn registry(&self) -> &Arc<dyn EnvironmentRegistry> {
        &self.inner.registry
    }

    pub fn is_loaded(&self) -> bool {
        !self.inner.cache.is_empty()
    }

    async fn ensure_loaded(&self, key: Option<&str>) -> ConfigResult<Arc<ConfigSnapshot>> {
        if let Some(snapshot) = self.inner.cache.snapshot() {
            debug!(key, "configuration cache hit");
            return Ok(snapshot);
        }

        let (generation, load) = {
            let mut slot = self
                .inner
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            // A load may have completed while we waited for the lock.
            if let Some(snapshot) = self.inner.cache.snapshot() {
                return Ok(snapshot);
            }

            if let Some(in_flight) = &slot.current {
                debug!(generation = in_flight.generation, "joining in-flight configuration load");
                (in_flight.generation, in_flight.load.clone())
            } else {
                let generation = slot.next_generation;
                slot.next_generation += 1;
                let inner = Arc::clone(&self.inner);
                let load = async move { inner.load(generation).await }.boxed().shared();
                slot.current = Some(InFlightLoad {
                    generation,
                    load: load.clone(),
                });
                (generation, load)
            }
        };

        let outcome = load.await;

        {
            let mut slot = self
                .inner
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if slot
                .current
                .as_ref()
                .is_some_and(|in_flight| in_flight.generation == generation)
            {
                slot.current = None;
            }
        }

        outcome.map_err(|failure| ConfigError::from_failure(failure, key))
    }
}

impl LoaderInner {
    #[instrument(skip(self), fields(source = self.fetcher.name(), layer = %self.options.layer_name))]
    async fn load(&self, generation: u64) -> LoadOutcome {
        info!("loading configuration from parameter store");
        let result = self.load_once().await;
        match &result {
            Ok(snapshot) => info!(
                keys = snapshot.len(),
                description = %self.options.description,
                "configuration loaded and merged"
            ),
            Err(err) => error!(error = %err, "Error loading configuration from parameter store"),
        }
        result
    }

    async fn load_once(&self) -> LoadOutcome {
        let raw = self.fetcher.fetch_raw().await?;
        let entries = payload_decoder::decode(&raw)?;
        let snapshot = Arc::new(ConfigSnapshot::new(entries, self.fetcher.name()));

        let layer_name = &self.options.layer_name;
        self.registry
            .add_layer(NamedLayer::new(layer_name, Arc::clone(&snapshot)));
        self.registry.refresh();

        let required = verifier::required_keys(&self.options.required_keys, snapshot.keys());
        if let Err(err) = verifier::verify(required, self.registry.as_ref()) {
            self.registry.remove_layer(layer_name);
            self.registry.refresh();
            return Err(err.into());
        }

        Ok(self.cache.publish(snapshot))
    }
}
