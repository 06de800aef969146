//! Form state for the create/edit dialog.
//!
//! Values are kept as JSON so that fields the user never touches are sent
//! back exactly as they were fetched. Editing a field turns it into a string.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::types::{input_value, Record};

const MULTILINE_MARKERS: [&str; 4] = ["comment", "remark", "note", "description"];

pub const REQUIRED_HINT: &str = "This field is required";

// ============================================================================
// Field Classification
// ============================================================================

/// Input widget used for a field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Multi-line text area
    TextArea,
    /// Date picker (`YYYY-MM-DD`)
    Date,
    /// Single-line text input
    Text,
}

impl FieldKind {
    /// Pick the widget from the field name alone.
    pub fn classify(field: &str) -> Self {
        let lower = field.to_lowercase();
        if MULTILINE_MARKERS.iter().any(|m| lower.contains(m)) {
            FieldKind::TextArea
        } else if is_date_field(field) {
            FieldKind::Date
        } else {
            FieldKind::Text
        }
    }

    /// Helper text shown under a filled-in field
    pub fn helper_text(&self) -> &'static str {
        match self {
            FieldKind::TextArea => "Enter detailed comments or remarks",
            FieldKind::Date | FieldKind::Text => "",
        }
    }
}

pub fn is_date_field(field: &str) -> bool {
    field.to_lowercase().contains("date")
}

/// Format a calendar day the way date inputs expect it.
pub fn format_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Save Validation
// ============================================================================

/// Whether empty required fields block saving
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequiredPolicy {
    /// Empty fields show a hint but the record can still be saved
    #[default]
    Advisory,
    /// Every field must be filled in before saving
    Enforce,
}

impl RequiredPolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            RequiredPolicy::Enforce
        } else {
            RequiredPolicy::Advisory
        }
    }
}

/// Local validation failures; no request is sent when one of these occurs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Please fill in at least one field")]
    EmptyPayload,

    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("No collection selected")]
    NoCollection,
}

// ============================================================================
// Form State
// ============================================================================

/// Editable copy of a record, scoped to one dialog session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    values: Record,
}

impl FormState {
    /// Blank form for "Add New": date fields default to `today`, the rest
    /// to an empty string.
    pub fn for_create(fields: &[String], today: NaiveDate) -> Self {
        let today = format_date(today);
        let values = fields
            .iter()
            .map(|field| {
                let initial = if is_date_field(field) { today.clone() } else { String::new() };
                (field.clone(), Value::String(initial))
            })
            .collect();
        Self { values }
    }

    /// Clone of an existing record, identifier included.
    pub fn for_edit(record: &Record) -> Self {
        Self { values: record.clone() }
    }

    /// Editable field names, in order, without the identifier
    pub fn fields<'a>(&'a self, id_field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values.keys().map(|k| k.as_str()).filter(move |k| *k != id_field)
    }

    /// Text currently shown in the input for `field`
    pub fn value(&self, field: &str) -> String {
        self.values.get(field).map(input_value).unwrap_or_default()
    }

    pub fn set(&mut self, field: &str, value: String) {
        self.values.insert(field.to_string(), Value::String(value));
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.value(field).is_empty()
    }

    /// Fields whose input is empty; these carry the required-field hint.
    pub fn missing_required(&self, id_field: &str) -> Vec<String> {
        self.fields(id_field)
            .filter(|f| self.is_blank(f))
            .map(str::to_string)
            .collect()
    }

    /// Body for the write request: a copy without the identifier.
    pub fn payload(&self, id_field: &str, policy: RequiredPolicy) -> Result<Record, SaveError> {
        let payload: Record = self
            .values
            .iter()
            .filter(|(key, _)| key.as_str() != id_field)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if payload.is_empty() {
            return Err(SaveError::EmptyPayload);
        }

        if policy == RequiredPolicy::Enforce {
            let missing = self.missing_required(id_field);
            if !missing.is_empty() {
                return Err(SaveError::MissingRequired(missing));
            }
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_field_classification() {
        assert_eq!(FieldKind::classify("managerComment"), FieldKind::TextArea);
        assert_eq!(FieldKind::classify("Remarks"), FieldKind::TextArea);
        assert_eq!(FieldKind::classify("footnote"), FieldKind::TextArea);
        assert_eq!(FieldKind::classify("DESCRIPTION"), FieldKind::TextArea);
        assert_eq!(FieldKind::classify("startDate"), FieldKind::Date);
        assert_eq!(FieldKind::classify("ownerName"), FieldKind::Text);
    }

    #[test]
    fn test_multiline_wins_over_date() {
        assert_eq!(FieldKind::classify("dateNotes"), FieldKind::TextArea);
    }

    #[test]
    fn test_create_defaults() {
        let fields = vec!["reviewDate".to_string(), "ownerName".to_string()];
        let form = FormState::for_create(&fields, day());
        assert_eq!(form.value("reviewDate"), "2024-03-07");
        assert_eq!(form.value("ownerName"), "");
        assert_eq!(form.fields("_id").collect::<Vec<_>>(), vec!["reviewDate", "ownerName"]);
    }

    #[test]
    fn test_edit_keeps_identifier_but_hides_it() {
        let form = FormState::for_edit(&record(json!({"_id": "1", "title": "a"})));
        assert_eq!(form.fields("_id").collect::<Vec<_>>(), vec!["title"]);
        assert_eq!(form.value("_id"), "1");
    }

    #[test]
    fn test_payload_strips_identifier() {
        let mut form = FormState::for_edit(&record(json!({"_id": "1", "title": "a", "count": 3})));
        form.set("title", "b".into());

        let payload = form.payload("_id", RequiredPolicy::Advisory).unwrap();
        assert!(!payload.contains_key("_id"));
        assert_eq!(payload.get("title"), Some(&json!("b")));
        // untouched fields keep their JSON type
        assert_eq!(payload.get("count"), Some(&json!(3)));
    }

    #[test]
    fn test_identifier_only_form_is_rejected() {
        let form = FormState::for_edit(&record(json!({"_id": "1"})));
        assert_eq!(form.payload("_id", RequiredPolicy::Advisory), Err(SaveError::EmptyPayload));
        assert_eq!(
            FormState::default().payload("_id", RequiredPolicy::Enforce),
            Err(SaveError::EmptyPayload)
        );
        assert_eq!(SaveError::EmptyPayload.to_string(), "Please fill in at least one field");
    }

    #[test]
    fn test_required_hint_is_advisory_by_default() {
        let fields = vec!["title".to_string(), "ownerName".to_string()];
        let mut form = FormState::for_create(&fields, day());
        form.set("title", "x".into());

        assert_eq!(form.missing_required("_id"), vec!["ownerName"]);
        assert!(form.payload("_id", RequiredPolicy::Advisory).is_ok());
        assert_eq!(
            form.payload("_id", RequiredPolicy::Enforce),
            Err(SaveError::MissingRequired(vec!["ownerName".to_string()]))
        );
    }

    #[test]
    fn test_null_counts_as_blank() {
        let form = FormState::for_edit(&record(json!({"_id": "1", "note": null})));
        assert!(form.is_blank("note"));
    }
}
