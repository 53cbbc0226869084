//! Default error messages.
//!
//! Every message names the offending key so that it reads on its own once
//! flattened out of the error tree.

use serde_json::Value;

/// A required key is absent.
pub fn missing(key: &str) -> String {
    format!("{} is required", key)
}

/// A document key has no schema entry.
pub fn extra(key: &str) -> String {
    format!("{} is not accepted", key)
}

/// A value is outside its allowed set.
pub fn contain(key: &str, allowed: &[Value]) -> String {
    format!("{} must be one of {}", key, join_values(allowed))
}

/// A nested schema was given something other than a document.
pub fn object(key: &str) -> String {
    format!("{} must be an object", key)
}

/// An element schema was given something other than a sequence.
pub fn array(key: &str) -> String {
    format!("{} must be an array", key)
}

/// A predicate rejected a value without a message of its own.
pub fn default(key: &str) -> String {
    format!("{} is not valid", key)
}

/// Renders values comma-separated, strings without quotes: `a,b,3`.
pub fn join_values(values: &[Value]) -> String {
    values.iter().map(render).collect::<Vec<_>>().join(",")
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => join_values(items),
        other => other.to_string(),
    }
}
