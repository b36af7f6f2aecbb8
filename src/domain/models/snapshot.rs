//! Configuration snapshot domain models.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single configuration value as decoded from the parameter store.
///
/// String, number, boolean, null, array or nested object.
pub type ConfigValue = serde_json::Value;

/// Default name of the layer parameter store keys are merged under.
pub const DEFAULT_LAYER_NAME: &str = "aws-env";

/// Immutable result of one successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    entries: BTreeMap<String, ConfigValue>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl ConfigSnapshot {
    pub fn new(entries: BTreeMap<String, ConfigValue>, source: impl Into<String>) -> Self {
        Self {
            entries,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, ConfigValue> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name of the fetcher that produced this snapshot.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// A snapshot registered into the environment registry under a fixed name.
#[derive(Debug, Clone)]
pub struct NamedLayer {
    pub name: String,
    pub snapshot: Arc<ConfigSnapshot>,
}

impl NamedLayer {
    pub fn new(name: impl Into<String>, snapshot: Arc<ConfigSnapshot>) -> Self {
        Self {
            name: name.into(),
            snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ConfigSnapshot {
        let mut entries = BTreeMap::new();
        entries.insert("B".to_string(), json!("2"));
        entries.insert("A".to_string(), json!(1));
        ConfigSnapshot::new(entries, "static")
    }

    #[test]
    fn test_keys_are_sorted() {
        let snapshot = sample();
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.get("A"), Some(&json!(1)));
        assert!(snapshot.contains_key("B"));
        assert!(snapshot.get("C").is_none());
        assert_eq!(snapshot.source(), "static");
    }
}
