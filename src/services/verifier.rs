//! Post-merge verification of required keys.

use tracing::{info, warn};

use crate::domain::errors::VerificationError;
use crate::domain::ports::EnvironmentRegistry;

/// Check that every required key resolves through the registry.
///
/// Collects all missing keys, in input order, before failing.
pub fn verify<I, S>(required_keys: I, registry: &dyn EnvironmentRegistry) -> Result<(), VerificationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let missing: Vec<String> = required_keys
        .into_iter()
        .filter(|key| !registry.contains(key.as_ref()))
        .map(|key| key.as_ref().to_string())
        .collect();

    if missing.is_empty() {
        info!("All required properties have been successfully loaded and verified.");
        return Ok(());
    }

    warn!(missing = ?missing, "required properties missing after merge");
    Err(VerificationError { missing })
}

/// Keys to verify for a payload: configured keys first, then payload keys
/// not already listed.
pub fn required_keys<'a>(
    configured: &'a [String],
    payload_keys: impl Iterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = Vec::with_capacity(configured.len());
    for key in configured {
        if !keys.contains(&key.as_str()) {
            keys.push(key);
        }
    }
    for key in payload_keys {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ConfigValue, NamedLayer};
    use std::collections::{BTreeMap, HashSet};

    struct FixedRegistry(HashSet<&'static str>);

    impl EnvironmentRegistry for FixedRegistry {
        fn add_layer(&self, _layer: NamedLayer) {}

        fn remove_layer(&self, _name: &str) -> bool {
            false
        }

        fn refresh(&self) {}

        fn contains(&self, key: &str) -> bool {
            self.0.contains(key)
        }

        fn find(&self, _key: &str) -> Option<ConfigValue> {
            None
        }

        fn layer(&self, _name: &str) -> Option<BTreeMap<String, ConfigValue>> {
            None
        }
    }

    #[test]
    fn test_verify_all_present() {
        let registry = FixedRegistry(["MCA_DOWNSTREAM_URL", "MCA_DOWNSTREAM_TIMEZONE"].into());
        let result = verify(
            ["MCA_DOWNSTREAM_URL", "MCA_DOWNSTREAM_TIMEZONE"],
            &registry,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_verify_reports_missing_key() {
        let registry = FixedRegistry(["MCA_DOWNSTREAM_URL"].into());
        let err = verify(
            ["MCA_DOWNSTREAM_URL", "MCA_DOWNSTREAM_TIMEZONE"],
            &registry,
        )
        .unwrap_err();
        assert_eq!(err.missing, vec!["MCA_DOWNSTREAM_TIMEZONE".to_string()]);
    }

    #[test]
    fn test_verify_collects_all_in_input_order() {
        let registry = FixedRegistry(["B"].into());
        let err = verify(["D", "A", "B", "C"], &registry).unwrap_err();
        assert_eq!(err.missing, vec!["D", "A", "C"]);
    }

    #[test]
    fn test_verify_empty_set() {
        let registry = FixedRegistry(HashSet::new());
        assert!(verify(Vec::<String>::new(), &registry).is_ok());
    }

    #[test]
    fn test_required_keys_configured_first_without_duplicates() {
        let configured = vec!["C".to_string(), "A".to_string(), "C".to_string()];
        let keys = required_keys(&configured, ["A", "B"].into_iter());
        assert_eq!(keys, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_required_keys_defaults_to_payload() {
        let keys = required_keys(&[], ["X", "Y"].into_iter());
        assert_eq!(keys, vec!["X", "Y"]);
    }
}
