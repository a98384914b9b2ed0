//! # Validation Module
//!
//! Intake form validation for Cotizador.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal form (dialoguer)                                    │
//! │  ├── Date / time / number parsing while typing                         │
//! │  └── Catalog multi-select                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Presence: name, email, phone, ≥1 equipment                        │
//! │  └── Duration inside 1–24 hours                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  QuoteRequest (immutable, only built here)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike single-field validators, [`validate_form`] reports every failing
//! field at once so the form can show all of them.

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::types::{QuoteForm, QuoteRequest};
use crate::{DATE_FORMAT, MAX_DURATION_HOURS, MIN_DURATION_HOURS, TIME_FORMAT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use cotizador_core::validation::validate_required;
///
/// assert_eq!(validate_required("name", "  Ana  ").unwrap(), "Ana");
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(value.to_string())
}

/// Validates the rental duration in hours (1–24 inclusive).
pub fn validate_duration(hours: u32) -> ValidationResult<()> {
    if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&hours) {
        return Err(ValidationError::OutOfRange {
            field: "duration".to_string(),
            min: MIN_DURATION_HOURS as i64,
            max: MAX_DURATION_HOURS as i64,
        });
    }

    Ok(())
}

/// Trims equipment names, drops blanks and collapses duplicates while
/// keeping first-seen order.
pub fn normalize_equipment(items: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim();
        if !item.is_empty() && !seen.iter().any(|s| s == item) {
            seen.push(item.to_string());
        }
    }
    seen
}

/// Parses a `dd/mm/YYYY` date as typed on the form.
pub fn parse_service_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: "service date".to_string(),
            reason: "expected dd/mm/yyyy".to_string(),
        }
    })
}

/// Parses an `HH:MM` start time as typed on the form.
pub fn parse_start_time(input: &str) -> ValidationResult<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: "start time".to_string(),
            reason: "expected HH:MM (24h)".to_string(),
        }
    })
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates a submitted form and builds the immutable [`QuoteRequest`].
///
/// ## Errors
/// Every failing field, in form order: name, email, phone, duration,
/// equipment.
pub fn validate_form(form: &QuoteForm) -> Result<QuoteRequest, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let client_name = validate_required("name", &form.client_name)
        .map_err(|e| errors.push(e))
        .ok();
    let email = validate_required("email", &form.email)
        .map_err(|e| errors.push(e))
        .ok();
    let phone = validate_required("phone", &form.phone)
        .map_err(|e| errors.push(e))
        .ok();

    if let Err(e) = validate_duration(form.duration_hours) {
        errors.push(e);
    }

    let equipment = normalize_equipment(&form.equipment);
    if equipment.is_empty() {
        errors.push(ValidationError::required("equipment"));
    }

    match (client_name, email, phone) {
        (Some(client_name), Some(email), Some(phone)) if errors.is_empty() => Ok(QuoteRequest {
            client_name,
            email,
            phone,
            service_date: form.service_date,
            start_time: form.start_time,
            duration_hours: form.duration_hours,
            equipment,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
