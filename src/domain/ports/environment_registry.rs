//! Environment registry port.
//!
//! The registry is the host process's hierarchical property system. The
//! loader merges its snapshot into it as one named layer and then relies on
//! a single guarantee: after `add_layer` followed by `refresh`, every key of
//! that layer is visible through `contains`.

use std::collections::BTreeMap;

use crate::domain::models::{ConfigValue, NamedLayer};

/// Hierarchical property registry that named layers are merged into.
///
/// Implementations use interior mutability; the loader holds the registry
/// behind an `Arc` and serializes its own writes.
pub trait EnvironmentRegistry: Send + Sync {
    /// Register a layer. A layer with the same name is replaced.
    fn add_layer(&self, layer: NamedLayer);

    /// Drop a previously registered layer. Returns `true` if one existed.
    fn remove_layer(&self, name: &str) -> bool;

    /// Rebuild the merged view so registered layers become visible to lookups.
    fn refresh(&self);

    /// Whether `key` resolves in the merged view.
    fn contains(&self, key: &str) -> bool;

    /// Resolve `key` in the merged view.
    fn find(&self, key: &str) -> Option<ConfigValue>;

    /// Key-value view of a single registered layer.
    fn layer(&self, name: &str) -> Option<BTreeMap<String, ConfigValue>>;
}
