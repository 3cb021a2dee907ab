//! Cache Key Module
//!
//! Builds deterministic cache keys of the form `{operation}:{params}`.

use serde_json::{Map, Value};

/// Separator between the operation name and the serialized parameters.
pub const KEY_SEPARATOR: char = ':';

// == Generate Key ==
/// Builds the cache key for an operation and its parameters.
///
/// Parameters are serialized as JSON with object keys sorted at every depth,
/// so structurally equal parameter objects always produce the same key no
/// matter how they were constructed. Missing or `null` parameters serialize
/// as `{}`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use shopizon_cache::cache::generate_key;
///
/// let key = generate_key("getProducts", Some(&json!({"page": 2, "limit": 20})));
/// assert_eq!(key, r#"getProducts:{"limit":20,"page":2}"#);
/// ```
pub fn generate_key(operation: &str, params: Option<&Value>) -> String {
    let params = match params {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => canonicalize(value),
    };
    format!("{}{}{}", operation, KEY_SEPARATOR, params)
}

// == Operation Name ==
/// Returns the operation-name portion of a key (text before the first `:`).
pub fn operation_name(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR)
        .map(|(operation, _)| operation)
        .unwrap_or(key)
}

/// Rebuilds a value with object keys in sorted order at every depth.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(&String, &Value)> = map.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                fields
                    .into_iter()
                    .map(|(name, field)| (name.clone(), canonicalize(field)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
