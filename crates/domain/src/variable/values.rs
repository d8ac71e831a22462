//! Loosely typed value maps supplied by the host application.

use serde_json::Value;

/// A key-value map of template data, as received from the backend.
///
/// Backend records are loosely shaped, so values keep their JSON type until
/// they are substituted.
pub type DataMap = serde_json::Map<String, Value>;

/// Converts a JSON value into a [`DataMap`].
///
/// Anything that is not a JSON object yields an empty map.
#[must_use]
pub fn data_map(value: Value) -> DataMap {
    match value {
        Value::Object(map) => map,
        _ => DataMap::new(),
    }
}

/// Coerces a value to the text that is substituted into a template.
///
/// `null` becomes the empty string, strings are used verbatim, numbers and
/// booleans use their display form and arrays/objects their compact JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Returns the coerced value if it counts as present.
///
/// Missing, `null` and empty-string values are absent.
#[must_use]
pub fn present_value(value: Option<&Value>) -> Option<String> {
    value.map(value_to_string).filter(|s| !s.is_empty())
}
