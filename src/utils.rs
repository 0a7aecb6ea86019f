use serde_json::Value;

/// Whether `value` is a plain JSON object without any keys.
///
/// Only objects qualify. Empty arrays, strings, `null` and other values are never "empty objects".
pub fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}
