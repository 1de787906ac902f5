//! Field-level validation for candidate donor records.
//!
//! Validation never throws: every rule runs independently and all failures
//! are collected into a list of human-readable messages attached to the
//! report. Callers decide what to do with an invalid draft.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::commands::donors::DonorDraft;
use crate::domain::reference;
use shared::BloodGroup;

// Bangladeshi mobile numbers as stored: "+880" followed by ten digits.
static CONTACT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+880\d{10}$").expect("contact number regex"));

// Permissive local@domain.tld shape; not an RFC 5322 validator.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Result of validating a donor draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }
}

/// Validate a candidate donor record. Deterministic, no side effects.
pub fn validate_donor(draft: &DonorDraft) -> ValidationReport {
    let mut errors = Vec::new();

    let name_ok = draft
        .name
        .as_deref()
        .map(|name| name.trim().chars().count() >= 3)
        .unwrap_or(false);
    if !name_ok {
        errors.push("Name must be at least 3 characters".to_string());
    }

    let blood_group_ok = draft
        .blood_group
        .as_deref()
        .map(|group| group.parse::<BloodGroup>().is_ok())
        .unwrap_or(false);
    if !blood_group_ok {
        errors.push(
            "Blood group must be valid (A+, A-, B+, B-, AB+, AB-, O+, O-)".to_string(),
        );
    }

    let district_ok = draft
        .district
        .as_deref()
        .map(reference::is_known_district)
        .unwrap_or(false);
    if !district_ok {
        errors.push("District must be a valid Bangladesh district".to_string());
    }

    // Contact number and email are optional; an empty string counts as absent.
    if let Some(contact) = draft.contact_number.as_deref() {
        if !contact.is_empty() && !CONTACT_NUMBER_RE.is_match(contact) {
            errors.push(
                "Contact number must be a valid Bangladesh number (+880xxxxxxxxxx)".to_string(),
            );
        }
    }

    if let Some(email) = draft.email.as_deref() {
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            errors.push("Email must be valid".to_string());
        }
    }

    ValidationReport::from_errors(errors)
}
