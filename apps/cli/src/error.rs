//! # Application Error Type
//!
//! Unified error type for the quoting pipeline.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cotizador                              │
//! │                                                                         │
//! │  QuoteService::submit                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Pricing error?  ──── CoreError::EmptySelection ────────┐               │
//! │         │                                               │               │
//! │         ▼                                               ▼               │
//! │  Folio / ledger? ──── StoreError::{Io,Format,Schema} ── AppError ──►    │
//! │         │                                               ▲   main:       │
//! │         ▼                                               │   anyhow      │
//! │  Document?       ──── RenderError::Write ───────────────┘   report      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `main` logs the failing error with its [`ErrorCode`] and prints the code
//! next to the message.
//!
//! Missing form fields are not errors: they come back as
//! `Submission::Rejected` so the form can be shown again.

use cotizador_core::CoreError;
use cotizador_render::RenderError;
use cotizador_store::StoreError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error returned by the application layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// The terminal form could not be shown or read.
    #[error("Terminal input failed: {0}")]
    Prompt(String),
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request failed validation
    ValidationError,

    /// Counter, ledger or document file unreadable or unwritable
    IoError,

    /// Counter file holds something other than a number
    FormatError,

    /// Ledger header does not match the expected columns
    SchemaError,

    /// Document could not be produced
    RenderError,

    /// Startup configuration rejected
    ConfigError,

    /// Terminal interaction failed
    PromptError,
}

impl ErrorCode {
    /// The code as printed in reports, e.g. `IO_ERROR`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::FormatError => "FORMAT_ERROR",
            ErrorCode::SchemaError => "SCHEMA_ERROR",
            ErrorCode::RenderError => "RENDER_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::PromptError => "PROMPT_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// The code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Core(_) => ErrorCode::ValidationError,
            AppError::Store(StoreError::Io { .. }) => ErrorCode::IoError,
            AppError::Store(StoreError::Format { .. } | StoreError::Exhausted { .. }) => {
                ErrorCode::FormatError
            }
            AppError::Store(StoreError::Schema { .. } | StoreError::Csv { .. }) => {
                ErrorCode::SchemaError
            }
            AppError::Render(RenderError::Write { .. }) => ErrorCode::IoError,
            AppError::Render(RenderError::Encode(_)) => ErrorCode::RenderError,
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::Prompt(_) => ErrorCode::PromptError,
        }
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(err.to_string())
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
