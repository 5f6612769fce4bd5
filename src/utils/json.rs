//! Helpers for loosely-typed JSON payloads.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Returns true for JSON values that count as "empty" input.
///
/// Mirrors the loose truthiness legacy callers relied on: `null`, `false`,
/// `0`, `""`, `[]` and `{}` are all empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Renders a scalar JSON value as text for storage in a text column.
///
/// Strings are taken verbatim, `null` becomes `None`, and anything else uses
/// its compact JSON form.
pub fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Renders a scalar as text; arrays and objects have no text form.
fn scalar_to_text(value: Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Array(_) => Err("expected a string or scalar, found an array"),
        Value::Object(_) => Err("expected a string or scalar, found an object"),
        scalar => Ok(value_to_text(scalar)),
    }
}

/// Reads a scalar field from a JSON object as text, if present.
///
/// Numbers and booleans are rendered the same way they are stored, so a
/// numeric `shipment_ref` still identifies its row.
pub fn str_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .cloned()
        .and_then(|v| scalar_to_text(v).ok().flatten())
}

/// Deserializes a required text column, accepting any scalar.
///
/// Spreadsheet exports emit numeric cells as JSON numbers; `1001` is stored
/// as `"1001"`. `null`, arrays and objects are rejected.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    scalar_to_text(value)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("expected a string or scalar, found null"))
}

/// Deserializes an optional text column, accepting any scalar.
///
/// Use with `#[serde(default)]` so that an absent field is `None` as well.
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    scalar_to_text(value).map_err(de::Error::custom)
}
