//! Request handlers.

pub mod analysis;
pub mod health;
pub mod support_triage;

use serde_json::Value;

/// Non-empty string field of a JSON object.
pub(crate) fn required_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
