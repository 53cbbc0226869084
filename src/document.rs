//! The document shape shared by the validator and the allower.

use serde_json::{Map, Value};

/// A decoded request body: string keys mapped to JSON values.
pub type Document = Map<String, Value>;

/// Returns the JSON type name for a value.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compares two values the way the membership rules do: numbers by value,
/// so `1` and `1.0` are equal.
pub(crate) fn value_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        _ => left == right,
    }
}

/// Membership test over `allowed` using [`value_eq`].
pub(crate) fn contains_value(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| value_eq(candidate, value))
}
