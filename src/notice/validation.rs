//! Input validation for notice requests.
//!
//! Every problem is collected before reporting so the caller can fix all
//! fields in one round trip. `amount` may be blank for notices that
//! involve no money.

use std::fmt;

use super::models::NoticeRequest;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Please provide the {}", label.to_lowercase()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line summary listing every failed field.
    pub fn to_message(&self) -> String {
        let details: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        format!(
            "Validation failed ({} error{}): {}",
            self.errors.len(),
            if self.errors.len() == 1 { "" } else { "s" },
            details.join("; ")
        )
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

impl NoticeRequest {
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(&self.notice_type, "notice_type", "Notice type", &mut errors);
        validate_required(&self.sender_name, "sender_name", "Sender name", &mut errors);
        validate_required(&self.sender_address, "sender_address", "Sender address", &mut errors);
        validate_required(&self.recipient_name, "recipient_name", "Recipient name", &mut errors);
        validate_required(
            &self.recipient_address,
            "recipient_address",
            "Recipient address",
            &mut errors,
        );
        validate_required(
            &self.issue_description,
            "issue_description",
            "Issue description",
            &mut errors,
        );
        validate_required(&self.incident_date, "incident_date", "Incident date", &mut errors);

        errors.into_result()
    }
}
