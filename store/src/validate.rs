//! Validation of untyped create/update bodies.
//!
//! Bodies arrive as a `serde_json::Value`. The key set is checked first, then
//! `title`, then `status`; the first failing rule decides the error. Only a
//! body that passes every rule becomes a typed `NewTodo` or `TodoPatch`.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::DEFAULT_STATUS;

pub const TITLE_MAX_CHARS: usize = 100;
pub const STATUS_MAX_CHARS: usize = 50;

const ALLOWED_KEYS: [&str; 2] = ["title", "status"];

/// Fields for a todo that passed create validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub status: String,
}

/// Fields to merge over an existing todo. At least one is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub status: Option<String>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }
}

pub fn validate_create(body: &Value) -> Result<NewTodo, ValidationError> {
    let fields = known_fields(body)?;
    let title = validate_title(fields.get("title"))?;
    let status = match fields.get("status") {
        Some(value) => validate_status(value)?,
        None => DEFAULT_STATUS.to_string(),
    };
    Ok(NewTodo { title, status })
}

/// Unlike create, an update body with no keys at all is rejected.
pub fn validate_update(body: &Value) -> Result<TodoPatch, ValidationError> {
    let fields = known_fields(body)?;
    if fields.is_empty() {
        return Err(ValidationError::InvalidBody);
    }
    let title = match fields.get("title") {
        Some(value) => Some(validate_title(Some(value))?),
        None => None,
    };
    let status = match fields.get("status") {
        Some(value) => Some(validate_status(value)?),
        None => None,
    };
    Ok(TodoPatch { title, status })
}

fn known_fields(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::InvalidBody)?;
    if fields.keys().any(|key| !ALLOWED_KEYS.contains(&key.as_str())) {
        return Err(ValidationError::InvalidBody);
    }
    Ok(fields)
}

/// `None` and JSON `null` both count as a missing title.
fn validate_title(value: Option<&Value>) -> Result<String, ValidationError> {
    let title = match value {
        None | Some(Value::Null) => return Err(ValidationError::TitleRequired),
        Some(Value::String(title)) => title,
        Some(_) => return Err(ValidationError::TitleInvalid),
    };
    if looks_numeric(title) || title.trim().is_empty() {
        return Err(ValidationError::TitleInvalid);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(title.clone())
}

fn validate_status(value: &Value) -> Result<String, ValidationError> {
    let status = match value {
        Value::String(status) if !status.trim().is_empty() => status,
        _ => return Err(ValidationError::StatusInvalid),
    };
    if status.chars().count() > STATUS_MAX_CHARS {
        return Err(ValidationError::StatusTooLong);
    }
    Ok(status.clone())
}

/// True when the trimmed string reads as a decimal number, e.g. `"42"`,
/// `" -1.5e3 "` or `"Infinity"`. Radix literals such as `"0x1A"` or
/// `"0b101"` are not decimal and pass as titles.
fn looks_numeric(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    if matches!(trimmed, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }
    // f64::from_str also accepts "inf" and "nan"; only finite values count.
    trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::unknown_key(json!({"title": "ok", "done": true}), ValidationError::InvalidBody)]
    #[case::not_an_object(json!(["title"]), ValidationError::InvalidBody)]
    #[case::missing_title(json!({}), ValidationError::TitleRequired)]
    #[case::null_title(json!({"title": null}), ValidationError::TitleRequired)]
    #[case::number_title(json!({"title": 7}), ValidationError::TitleInvalid)]
    #[case::numeric_string(json!({"title": "123"}), ValidationError::TitleInvalid)]
    #[case::float_string(json!({"title": " -4.5e2 "}), ValidationError::TitleInvalid)]
    #[case::infinity(json!({"title": "Infinity"}), ValidationError::TitleInvalid)]
    #[case::empty_title(json!({"title": ""}), ValidationError::TitleInvalid)]
    #[case::blank_title(json!({"title": "   "}), ValidationError::TitleInvalid)]
    #[case::long_title(json!({"title": "a".repeat(101)}), ValidationError::TitleTooLong)]
    #[case::blank_status(json!({"title": "ok", "status": " "}), ValidationError::StatusInvalid)]
    #[case::bool_status(json!({"title": "ok", "status": false}), ValidationError::StatusInvalid)]
    #[case::null_status(json!({"title": "ok", "status": null}), ValidationError::StatusInvalid)]
    #[case::long_status(json!({"title": "ok", "status": "s".repeat(51)}), ValidationError::StatusTooLong)]
    fn create_rejects(#[case] body: Value, #[case] expected: ValidationError) {
        assert_eq!(validate_create(&body), Err(expected));
    }

    #[rstest]
    #[case::max_title(json!({"title": "t".repeat(TITLE_MAX_CHARS)}))]
    #[case::max_status(json!({"title": "ok", "status": "s".repeat(STATUS_MAX_CHARS)}))]
    fn create_accepts_max_lengths(#[case] body: Value) {
        assert!(validate_create(&body).is_ok());
    }

    #[test]
    fn key_check_runs_before_field_rules() {
        let body = json!({"title": "", "extra": 1});
        assert_eq!(validate_create(&body), Err(ValidationError::InvalidBody));
    }

    #[test]
    fn title_rules_run_before_status_rules() {
        let body = json!({"title": 1, "status": ""});
        assert_eq!(validate_create(&body), Err(ValidationError::TitleInvalid));
    }

    #[test]
    fn create_defaults_status() {
        let new = validate_create(&json!({"title": "buy milk"})).unwrap();
        assert_eq!(new.title, "buy milk");
        assert_eq!(new.status, DEFAULT_STATUS);
    }

    #[test]
    fn create_keeps_title_untrimmed_and_counts_chars() {
        let title = format!(" {} ", "é".repeat(98));
        let new = validate_create(&json!({"title": title, "status": "doing"})).unwrap();
        assert_eq!(new.title, title);
        assert_eq!(new.status, "doing");
    }

    #[rstest]
    #[case::nan("NaN")]
    #[case::inf("inf")]
    #[case::hex_like("12abc")]
    #[case::hex_literal("0x1A")]
    #[case::words("milk 2")]
    fn non_numeric_titles_pass(#[case] title: &str) {
        assert!(validate_create(&json!({ "title": title })).is_ok());
    }

    #[rstest]
    #[case::empty(json!({}))]
    #[case::unknown(json!({"status": "done", "id": "x"}))]
    #[case::created_at(json!({"createdAt": "2024-01-01T00:00:00Z"}))]
    #[case::string_body(json!("title"))]
    fn update_rejects_bad_key_sets(#[case] body: Value) {
        assert_eq!(validate_update(&body), Err(ValidationError::InvalidBody));
    }

    #[test]
    fn update_applies_full_rules_to_present_fields() {
        assert_eq!(
            validate_update(&json!({"title": null})),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            validate_update(&json!({"status": "x".repeat(51)})),
            Err(ValidationError::StatusTooLong)
        );
    }

    #[test]
    fn update_returns_only_present_fields() {
        let patch = validate_update(&json!({"status": "done"})).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.status.as_deref(), Some("done"));
        assert!(!patch.is_empty());
    }
}
