//! Implementation of the `paramlayer show` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{ensure_settings_file, settings_figment};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::ConfigValue;
use crate::infrastructure::setup::Application;

const MAX_VALUE_WIDTH: usize = 80;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print a single key instead of the whole layer
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LayerOutput {
    pub layer: String,
    pub description: String,
    pub source: String,
    pub entries: BTreeMap<String, ConfigValue>,
}

impl CommandOutput for LayerOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Layer '{}' ({}, source: {}), {} key(s)",
            self.layer,
            self.description,
            self.source,
            self.entries.len()
        )];
        let width = self.entries.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in &self.entries {
            lines.push(format!(
                "  {key:<width$}  {}",
                truncate(&render_value(value), MAX_VALUE_WIDTH)
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.entries).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ValueOutput {
    pub key: String,
    pub value: ConfigValue,
}

impl CommandOutput for ValueOutput {
    fn to_human(&self) -> String {
        render_value(&self.value)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Strings print bare; everything else prints as compact JSON.
fn render_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub async fn execute(args: ShowArgs, config: Option<&Path>, json_mode: bool) -> Result<()> {
    ensure_settings_file(config)?;
    let Application { loader, .. } = Application::build(settings_figment(config))?;

    if let Some(key) = args.key {
        let value = loader.get(&key).await?;
        output(&ValueOutput { key, value }, json_mode);
        return Ok(());
    }

    let snapshot = loader.get_all().await?;
    output(
        &LayerOutput {
            layer: loader.layer_name().to_string(),
            description: loader.description().to_string(),
            source: snapshot.source().to_string(),
            entries: snapshot.entries().clone(),
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!({"a": true})), r#"{"a":true}"#);
    }

    #[test]
    fn test_layer_output_human() {
        let mut entries = BTreeMap::new();
        entries.insert("MCA_DOWNSTREAM_URL".to_string(), json!("<Some URL>"));
        entries.insert("PORT".to_string(), json!(8080));
        let out = LayerOutput {
            layer: "aws-env".to_string(),
            description: "AWS Configuration Client".to_string(),
            source: "static".to_string(),
            entries,
        };

        let human = out.to_human();
        assert!(human.starts_with("Layer 'aws-env'"));
        assert!(human.contains("MCA_DOWNSTREAM_URL  <Some URL>"));
        assert!(human.contains("PORT                8080"));
        assert_eq!(out.to_json(), json!({"MCA_DOWNSTREAM_URL": "<Some URL>", "PORT": 8080}));
    }
}
