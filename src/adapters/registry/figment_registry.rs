//! Environment registry backed by `figment`.
//!
//! The registry keeps a base figment (the host's own configuration
//! providers) and a list of named layers. `refresh` rebuilds the merged
//! view: base first, then every layer in registration order, so later
//! layers take precedence. Lookups only see the last refreshed view.
//!
//! Layer keys always resolve under their literal name, whatever characters
//! they contain. Keys that also form a clean dotted path (`db.url`) are
//! nested into the merged figment, and environment-style keys
//! (`MCA_DOWNSTREAM_URL`) additionally resolve as `mca.downstream.url`.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use figment::providers::Serialized;
use figment::value::{Dict, Map, Value};
use figment::{Figment, Metadata, Profile, Provider};
use tracing::{debug, warn};

use crate::domain::models::{ConfigValue, NamedLayer};
use crate::domain::ports::EnvironmentRegistry;

/// Figment provider exposing one named layer.
///
/// Never fails: entries that cannot be expressed as a figment path are left
/// out of the figment and stay reachable through the literal key index.
struct LayerProvider<'a> {
    layer: &'a NamedLayer,
}

impl LayerProvider<'_> {
    fn merge_entry(&self, figment: Figment, path: &str, value: &ConfigValue) -> Figment {
        match Value::serialize(value) {
            Ok(value) => figment.merge(Serialized::global(path, value)),
            Err(err) => {
                warn!(layer = %self.layer.name, key = path, error = %err, "value left out of merged figment");
                figment
            }
        }
    }
}

impl Provider for LayerProvider<'_> {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("layer '{}'", self.layer.name))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let entries = self.layer.snapshot.entries();

        // Aliases go first so literal keys override them.
        let aliased = entries.iter().filter_map(|(key, value)| {
            env_alias(key)
                .filter(|alias| !entries.contains_key(alias))
                .map(|alias| (alias, value))
        });
        let figment = aliased.fold(Figment::new(), |figment, (alias, value)| {
            self.merge_entry(figment, &alias, value)
        });

        let figment = entries
            .iter()
            .filter(|(key, _)| is_path(key) && !shadowed_by_prefix(key, entries))
            .fold(figment, |figment, (key, value)| {
                self.merge_entry(figment, key, value)
            });

        figment.data()
    }
}

/// Whether `key` splits into non-empty dot-separated segments.
fn is_path(key: &str) -> bool {
    key.split('.').all(|segment| !segment.is_empty())
}

/// Whether a dotted prefix of `key` is itself a key of the layer.
///
/// Nesting `a.b` would replace the value of `a`, so `a.b` stays literal.
fn shadowed_by_prefix(key: &str, entries: &BTreeMap<String, ConfigValue>) -> bool {
    key.match_indices('.')
        .any(|(at, _)| entries.contains_key(&key[..at]))
}

/// Environment-variable spelling of a property path.
///
/// `MCA_DOWNSTREAM_URL` maps to `mca.downstream.url`; keys that are not
/// upper-case underscore-separated words have no alias.
fn env_alias(key: &str) -> Option<String> {
    let env_style = key.split('_').all(|word| !word.is_empty())
        && key.chars().any(|c| c.is_ascii_uppercase())
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    env_style.then(|| key.to_ascii_lowercase().replace('_', "."))
}

/// Merged view as of the last refresh.
struct MergedView {
    figment: Figment,
    /// Literal layer keys and their aliases, later layers overriding earlier.
    keys: BTreeMap<String, ConfigValue>,
}

impl MergedView {
    fn build(base: &Figment, layers: &[NamedLayer]) -> Self {
        let mut keys = BTreeMap::new();
        let mut figment = base.clone();
        for layer in layers {
            let entries = layer.snapshot.entries();
            for (key, value) in entries {
                if let Some(alias) = env_alias(key).filter(|alias| !entries.contains_key(alias)) {
                    keys.insert(alias, value.clone());
                }
            }
            keys.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
            figment = figment.merge(LayerProvider { layer });
        }
        Self { figment, keys }
    }
}

/// Layered property registry built on figment.
pub struct FigmentRegistry {
    base: Figment,
    layers: RwLock<Vec<NamedLayer>>,
    merged: RwLock<MergedView>,
}

impl FigmentRegistry {
    /// Registry with no base configuration.
    pub fn new() -> Self {
        Self::with_base(Figment::new())
    }

    /// Registry layering parameter store keys on top of an existing figment.
    pub fn with_base(base: Figment) -> Self {
        Self {
            merged: RwLock::new(MergedView::build(&base, &[])),
            base,
            layers: RwLock::new(Vec::new()),
        }
    }

    /// The merged figment as of the last refresh.
    ///
    /// Layer keys that are not clean dotted paths, or whose prefix is itself
    /// a layer key, are only visible through `contains` and `find`.
    pub fn merged(&self) -> Figment {
        self.merged
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .figment
            .clone()
    }

    /// Names of registered layers, in precedence order (lowest first).
    pub fn layer_names(&self) -> Vec<String> {
        self.layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|layer| layer.name.clone())
            .collect()
    }
}

impl Default for FigmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentRegistry for FigmentRegistry {
    fn add_layer(&self, layer: NamedLayer) {
        let mut layers = self.layers.write().unwrap_or_else(PoisonError::into_inner);
        debug!(layer = %layer.name, keys = layer.snapshot.len(), "adding registry layer");
        if let Some(existing) = layers.iter_mut().find(|l| l.name == layer.name) {
            *existing = layer;
        } else {
            layers.push(layer);
        }
    }

    fn remove_layer(&self, name: &str) -> bool {
        let mut layers = self.layers.write().unwrap_or_else(PoisonError::into_inner);
        let before = layers.len();
        layers.retain(|layer| layer.name != name);
        before != layers.len()
    }

    fn refresh(&self) {
        let layers = self.layers.read().unwrap_or_else(PoisonError::into_inner);
        let view = MergedView::build(&self.base, &layers);
        *self.merged.write().unwrap_or_else(PoisonError::into_inner) = view;
    }

    fn contains(&self, key: &str) -> bool {
        let view = self.merged.read().unwrap_or_else(PoisonError::into_inner);
        view.keys.contains_key(key) || view.figment.contains(key)
    }

    fn find(&self, key: &str) -> Option<ConfigValue> {
        let view = self.merged.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = view.keys.get(key) {
            return Some(value.clone());
        }
        view.figment.find_value(key).ok()?.deserialize().ok()
    }

    fn layer(&self, name: &str) -> Option<BTreeMap<String, ConfigValue>> {
        self.layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| layer.snapshot.entries().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ConfigSnapshot;
    use serde_json::json;
    use std::sync::Arc;

    fn layer(name: &str, value: serde_json::Value) -> NamedLayer {
        let entries = value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        NamedLayer::new(name, Arc::new(ConfigSnapshot::new(entries, "test")))
    }

    #[test]
    fn test_layer_invisible_until_refresh() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"MCA_DOWNSTREAM_URL": "u"})));
        assert!(!registry.contains("MCA_DOWNSTREAM_URL"));

        registry.refresh();
        assert!(registry.contains("MCA_DOWNSTREAM_URL"));
        assert_eq!(registry.find("MCA_DOWNSTREAM_URL"), Some(json!("u")));
    }

    #[test]
    fn test_value_types_survive_merge() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer(
            "aws-env",
            json!({"PORT": 8080, "ENABLED": true, "NAME": "svc", "NESTED": {"inner": "v"}}),
        ));
        registry.refresh();

        assert_eq!(registry.find("PORT"), Some(json!(8080)));
        assert_eq!(registry.find("ENABLED"), Some(json!(true)));
        assert_eq!(registry.find("NAME"), Some(json!("svc")));
        assert_eq!(registry.find("NESTED.inner"), Some(json!("v")));
    }

    #[test]
    fn test_dotted_keys_resolve_as_paths() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"db.url": "postgres://db"})));
        registry.refresh();

        assert!(registry.contains("db.url"));
        assert_eq!(registry.find("db.url"), Some(json!("postgres://db")));
    }

    #[test]
    fn test_later_layer_wins() {
        let registry = FigmentRegistry::with_base(
            Figment::new().merge(Serialized::global("TIMEZONE", "UTC")),
        );
        assert!(registry.contains("TIMEZONE"));

        registry.add_layer(layer("aws-env", json!({"TIMEZONE": "Europe/Paris"})));
        registry.refresh();
        assert_eq!(registry.find("TIMEZONE"), Some(json!("Europe/Paris")));
    }

    #[test]
    fn test_add_layer_replaces_same_name() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"A": "1"})));
        registry.add_layer(layer("aws-env", json!({"B": "2"})));
        registry.refresh();

        assert_eq!(registry.layer_names(), vec!["aws-env".to_string()]);
        assert!(!registry.contains("A"));
        assert!(registry.contains("B"));
    }

    #[test]
    fn test_remove_layer() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"A": "1"})));
        registry.refresh();
        assert!(registry.remove_layer("aws-env"));
        assert!(!registry.remove_layer("aws-env"));
        registry.refresh();

        assert!(!registry.contains("A"));
        assert!(registry.layer("aws-env").is_none());
    }

    #[test]
    fn test_layer_view() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"A": "1", "B": "2"})));

        let view = registry.layer("aws-env").unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view["A"], json!("1"));
        assert!(registry.layer("other").is_none());
    }

    #[test]
    fn test_keys_outside_path_syntax_stay_visible() {
        for payload in [json!({"": "x", "OK": "1"}), json!({".lead": "x", "OK": "1"})] {
            let registry = FigmentRegistry::with_base(
                Figment::new().merge(Serialized::global("TIMEZONE", "UTC")),
            );
            registry.add_layer(layer("aws-env", payload.clone()));
            registry.refresh();

            for (key, value) in payload.as_object().unwrap() {
                assert!(registry.contains(key), "{key:?} should resolve");
                assert_eq!(registry.find(key).as_ref(), Some(value));
            }
            assert_eq!(registry.find("TIMEZONE"), Some(json!("UTC")));
            assert_eq!(registry.merged().find_value("OK").unwrap().as_str(), Some("1"));
        }
    }

    #[test]
    fn test_odd_dotted_keys_resolve_literally() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"a..b": 1, "trail.": 2, "ünï code": 3})));
        registry.refresh();

        assert_eq!(registry.find("a..b"), Some(json!(1)));
        assert_eq!(registry.find("trail."), Some(json!(2)));
        assert_eq!(registry.find("ünï code"), Some(json!(3)));
    }

    #[test]
    fn test_flat_key_not_replaced_by_dotted_sibling() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"a": "1", "a.b": "2"})));
        registry.refresh();

        assert_eq!(registry.find("a"), Some(json!("1")));
        assert_eq!(registry.find("a.b"), Some(json!("2")));
        assert_eq!(registry.merged().find_value("a").unwrap().as_str(), Some("1"));
    }

    #[test]
    fn test_env_style_keys_resolve_as_property_paths() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer(
            "aws-env",
            json!({"MCA_DOWNSTREAM_URL": "http://downstream", "MCA_DOWNSTREAM_TIMEZONE": "UTC"}),
        ));
        assert!(!registry.contains("mca.downstream.url"));
        registry.refresh();

        assert_eq!(registry.find("mca.downstream.url"), Some(json!("http://downstream")));
        assert_eq!(registry.find("MCA_DOWNSTREAM_URL"), Some(json!("http://downstream")));
        assert_eq!(
            registry.merged().find_value("mca.downstream.timezone").unwrap().as_str(),
            Some("UTC")
        );
    }

    #[test]
    fn test_literal_key_wins_over_alias() {
        let registry = FigmentRegistry::new();
        registry.add_layer(layer("aws-env", json!({"PORT": 1, "port": 2})));
        registry.refresh();

        assert_eq!(registry.find("port"), Some(json!(2)));
        assert_eq!(registry.find("PORT"), Some(json!(1)));
    }

    #[test]
    fn test_env_alias() {
        assert_eq!(env_alias("MCA_DOWNSTREAM_URL").as_deref(), Some("mca.downstream.url"));
        assert_eq!(env_alias("PORT2").as_deref(), Some("port2"));
        assert_eq!(env_alias("db.url"), None);
        assert_eq!(env_alias("Mixed_Case"), None);
        assert_eq!(env_alias("_LEADING"), None);
        assert_eq!(env_alias("A__B"), None);
        assert_eq!(env_alias("123"), None);
    }
}
