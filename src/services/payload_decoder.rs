//! Decoding of raw parameter store payloads.
//!
//! The expected payload is a flat JSON object mapping string keys to values.
//! Only syntax is checked here; which keys must exist is the verifier's job.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::errors::DecodeError;
use crate::domain::models::ConfigValue;

/// Parse a raw payload into a key-value mapping.
pub fn decode(raw: &[u8]) -> Result<BTreeMap<String, ConfigValue>, DecodeError> {
    match serde_json::from_slice::<Value>(raw)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(DecodeError::NotAnObject(json_type_name(&other))),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
