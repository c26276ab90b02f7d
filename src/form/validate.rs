//! Client-side checks run before a form submission leaves the session
//!
//! Business rules beyond these belong to the backend.

use super::schema::{FormSchema, PROOF_FIELD};
use super::values::FormValues;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const EMAIL_FIELD: &str = "email_demandeur";
const PHONE_FIELD: &str = "telephone";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").expect("valid email regex")
});

/// Togolese mobile: optional country prefix, then 7 or 9 and seven more digits
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+228|00228|228)?[79][0-9]{7}$").expect("valid phone regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("A payment proof is required")]
    MissingProof,
    #[error("Field '{label}' is required")]
    MissingField { field: String, label: String },
    #[error("invalid email")]
    InvalidEmail,
    #[error("phone must be 8 digits, Togo format")]
    InvalidPhone,
}

impl ValidationError {
    /// Field the error is attached to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingProof => PROOF_FIELD,
            ValidationError::MissingField { field, .. } => field,
            ValidationError::InvalidEmail => EMAIL_FIELD,
            ValidationError::InvalidPhone => PHONE_FIELD,
        }
    }
}

/// Check a submission. All errors are reported, required fields first.
pub fn validate(
    schema: &FormSchema,
    values: &FormValues,
    proof_count: usize,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for id in &schema.required_fields {
        if id == PROOF_FIELD {
            if proof_count == 0 {
                errors.push(ValidationError::MissingProof);
            }
        } else if values.filled(id).is_none() {
            errors.push(ValidationError::MissingField {
                field: id.clone(),
                label: schema.label_for(id).to_string(),
            });
        }
    }

    if let Some(email) = values.filled(EMAIL_FIELD) {
        if !is_valid_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }
    }

    if let Some(phone) = values.filled(PHONE_FIELD) {
        if !is_valid_phone(phone) {
            errors.push(ValidationError::InvalidPhone);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Drop the spaces and hyphens people type between digit groups
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(&normalize_phone(phone))
}
