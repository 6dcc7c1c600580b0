use chrono::NaiveDate;
use serde::Serialize;

/// A validation failure attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Collects per-field errors; one message per field, first one wins.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: Option<String>) {
        if let Some(message) = message {
            if !self.0.iter().any(|e| e.field == field) {
                self.0.push(FieldError::new(field, message));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), crate::errors::AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(crate::errors::AppError::Validation(self.0))
        }
    }
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: Option<&str>, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.unwrap_or("").trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// A field that becomes mandatory under some condition (e.g. FP-only roles).
pub fn validate_present(value: Option<&str>, field_name: &str) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => None,
        _ => Some(format!("{field_name} is required")),
    }
}

/// Amounts must be zero or positive.
pub fn validate_non_negative(value: Option<f64>, field_name: &str) -> Option<String> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Some(format!("{field_name} must be zero or positive")),
        _ => None,
    }
}

/// Budget range: min <= max when both are given.
pub fn validate_range(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => {
            Some("Minimum budget must not exceed maximum budget".to_string())
        }
        _ => None,
    }
}

/// Date range: start strictly before end when both are given.
pub fn validate_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(s), Some(e)) if s >= e => Some("Start date must be before end date".to_string()),
        _ => None,
    }
}

/// Percentages are bounded to 0..=100.
pub fn validate_percentage(value: i64, field_name: &str) -> Option<String> {
    if !(0..=100).contains(&value) {
        return Some(format!("{field_name} must be between 0 and 100"));
    }
    None
}
