//! # Error Types
//!
//! Domain-specific error types for cotizador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cotizador-core errors (this file)                                     │
//! │  ├── CoreError        - Quote calculation failures                     │
//! │  └── ValidationError  - Intake form failures                           │
//! │                                                                         │
//! │  cotizador-store                                                       │
//! │  └── StoreError       - Counter / ledger file failures                 │
//! │                                                                         │
//! │  cotizador-render                                                      │
//! │  └── RenderError      - Document output failures                       │
//! │                                                                         │
//! │  Flow: CoreError ───────────────────┐                                  │
//! │        StoreError ──────────────────┼─► AppError → terminal            │
//! │        RenderError ─────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A quote was requested for zero equipment items.
    #[error("A quote needs at least one equipment item")]
    EmptySelection,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when the intake form is submitted with missing or
/// malformed data. The form reports every failing field, not just the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable date or time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
