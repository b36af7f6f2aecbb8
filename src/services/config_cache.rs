//! In-process snapshot cache.
//!
//! Holds at most one published snapshot for the lifetime of the process.
//! Reads are lock-free once published; there is no eviction and no TTL.

use std::sync::{Arc, OnceLock};

use crate::domain::models::ConfigSnapshot;

/// Single authoritative in-memory snapshot.
#[derive(Debug, Default)]
pub struct ConfigCache {
    slot: OnceLock<Arc<ConfigSnapshot>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.get().is_none()
    }

    pub fn snapshot(&self) -> Option<Arc<ConfigSnapshot>> {
        self.slot.get().cloned()
    }

    /// Publish a snapshot. The first writer wins; every caller gets back the
    /// snapshot that is actually stored.
    pub fn publish(&self, snapshot: Arc<ConfigSnapshot>) -> Arc<ConfigSnapshot> {
        Arc::clone(self.slot.get_or_init(|| snapshot))
    }
}
