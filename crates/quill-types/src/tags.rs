//! Tag normalization.
//!
//! Tags are stored server-side as a JSON-encoded string column. Depending on
//! the endpoint they reach the client either already decoded (a JSON array) or
//! still encoded (a JSON string containing an array). Both shapes normalize to
//! the same ordered sequence.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::TypeError;

/// Normalize a raw `tags` value into an ordered sequence of tag names.
///
/// - `null` → empty
/// - `["a", "b"]` → unchanged
/// - `"[\"a\",\"b\"]"` → decoded
/// - `""` → empty
///
/// Anything else is rejected.
pub fn normalize_tags(raw: &Value) -> Result<Vec<String>, TypeError> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(TypeError::InvalidTags(format!("non-string tag {other}"))),
            })
            .collect(),
        Value::String(encoded) => decode_encoded(encoded),
        other => Err(TypeError::InvalidTags(format!("unexpected tags value {other}"))),
    }
}

fn decode_encoded(encoded: &str) -> Result<Vec<String>, TypeError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let decoded: Value =
        serde_json::from_str(trimmed).map_err(|e| TypeError::InvalidTags(e.to_string()))?;
    match decoded {
        // Only one level of encoding is accepted.
        Value::String(_) => Err(TypeError::InvalidTags(format!(
            "tags encoded more than once: {trimmed}"
        ))),
        other => normalize_tags(&other),
    }
}

/// Serde adapter for the `tags` field of [`crate::Post`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    normalize_tags(&raw).map_err(de::Error::custom)
}
