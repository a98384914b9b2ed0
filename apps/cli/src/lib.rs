//! # cotizador-cli: Quote Intake Application
//!
//! Wires the core rules, the file store and the PDF renderer into one
//! request-per-invocation pipeline behind a terminal form.
//!
//! ## Module Organization
//!
//! - [`service`] - `QuoteService`, the pipeline
//! - [`form`] - dialoguer prompts producing a `QuoteForm`
//! - [`config`] - layered configuration
//! - [`error`] - `AppError` and error codes
//!
//! ## Concurrency
//! One process handles one request at a time. Two processes sharing the same
//! counter and ledger files race on both (read-modify-write without a lock)
//! and may issue the same folio.

pub mod config;
pub mod error;
pub mod form;
pub mod service;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use service::{IssuedQuote, QuoteService, Submission, SUCCESS_MESSAGE};
