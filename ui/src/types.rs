//! Record and identifier types shared by the admin views

use serde_json::{Map, Value};
use std::fmt;

/// One item of a collection, keys in the order the server sent them.
pub type Record = Map<String, Value>;

/// Default name of the reserved identifier field.
pub const DEFAULT_ID_FIELD: &str = "_id";

// ============================================================================
// Record Identifier
// ============================================================================

/// Identifier of a record, as used in `PUT`/`DELETE` paths
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the identifier of `record` stored under `id_field`.
    ///
    /// Accepts plain strings, numbers and extended JSON object ids
    /// (`{"$oid": "..."}`). Anything else yields `None`.
    pub fn of(record: &Record, id_field: &str) -> Option<Self> {
        match record.get(id_field)? {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            Value::Object(obj) => match obj.get("$oid") {
                Some(Value::String(s)) if !s.is_empty() => Some(Self(s.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Value Display
// ============================================================================

/// Render a field value for a table cell.
///
/// Strings are shown verbatim, scalars in their plain form, and
/// objects, arrays and `null` as pretty-printed JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

/// Render a field value for a form input. `null` becomes an empty input.
pub fn input_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_id_from_string_and_number() {
        let r = record(json!({"_id": "abc123", "name": "x"}));
        assert_eq!(RecordId::of(&r, "_id"), Some(RecordId::new("abc123")));

        let r = record(json!({"id": 42}));
        assert_eq!(RecordId::of(&r, "id").unwrap().as_str(), "42");
    }

    #[test]
    fn test_record_id_from_extended_json() {
        let r = record(json!({"_id": {"$oid": "65f0c0ffee"}}));
        assert_eq!(RecordId::of(&r, "_id").unwrap().to_string(), "65f0c0ffee");
    }

    #[test]
    fn test_record_id_missing_or_unusable() {
        assert!(RecordId::of(&record(json!({"name": "x"})), "_id").is_none());
        assert!(RecordId::of(&record(json!({"_id": ""})), "_id").is_none());
        assert!(RecordId::of(&record(json!({"_id": [1, 2]})), "_id").is_none());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("plain text")), "plain text");
        assert_eq!(display_value(&json!(3.5)), "3.5");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!({"a": 1})), "{\n  \"a\": 1\n}");
        assert_eq!(display_value(&json!([1])), "[\n  1\n]");
    }

    #[test]
    fn test_input_value_blanks_null() {
        assert_eq!(input_value(&json!(null)), "");
        assert_eq!(input_value(&json!(7)), "7");
    }

    #[test]
    fn test_record_preserves_server_key_order() {
        let r: Record = serde_json::from_str(r#"{"zeta": 1, "_id": "x", "alpha": 2}"#).unwrap();
        let keys: Vec<&str> = r.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "_id", "alpha"]);
    }
}
