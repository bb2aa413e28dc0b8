//! Field lookups over loosely-typed remote records.
//!
//! The management API does not agree with itself on field names, so
//! canonical types are built by probing a list of candidate keys. These
//! helpers are the only place that looks at raw JSON.

use serde_json::Value;

use crate::time::Timestamp;

/// String form of a JSON scalar.
///
/// Strings are trimmed; empty strings, `null`, booleans, arrays and objects
/// yield `None`.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty scalar found under `keys`, in order.
#[must_use]
pub fn first_scalar(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find_map(scalar_to_string)
}

/// Boolean under `key`, only when the field is an actual JSON boolean.
#[must_use]
pub fn strict_bool(record: &Value, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

/// RFC 3339 timestamp under the first matching key.
#[must_use]
pub fn timestamp(record: &Value, keys: &[&str]) -> Option<Timestamp> {
    first_scalar(record, keys)
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(&raw).ok())
        .map(|ts| ts.with_timezone(&chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_skip_empty_and_null_values() {
        let record = json!({"a": "", "b": null, "c": "  x  "});
        assert_eq!(first_scalar(&record, &["a", "b", "c"]), Some("x".into()));
    }

    #[test]
    fn should_stringify_numbers() {
        let record = json!({"id": 7});
        assert_eq!(first_scalar(&record, &["id"]), Some("7".into()));
    }

    #[test]
    fn should_ignore_nested_objects() {
        let record = json!({"plugin": {"uuid": "p"}});
        assert_eq!(first_scalar(&record, &["plugin"]), None);
    }

    #[test]
    fn should_only_accept_real_booleans() {
        let record = json!({"a": true, "b": "true"});
        assert_eq!(strict_bool(&record, "a"), Some(true));
        assert_eq!(strict_bool(&record, "b"), None);
    }

    #[test]
    fn should_parse_rfc3339_timestamp() {
        let record = json!({"created_at": "2024-03-01T10:00:00+00:00"});
        let ts = timestamp(&record, &["created_at"]).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }
}
