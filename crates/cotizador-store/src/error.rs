//! # Store Error Types
//!
//! Error types for the counter and ledger files.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and categorization      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (apps/cli) ← Error code + message for the terminal           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read or written.
    ///
    /// ## When This Occurs
    /// - Permission denied on the counter or ledger file
    /// - Parent directory missing or read-only
    /// - Disk full
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The counter file does not hold a non-negative integer.
    #[error("Counter file {path} holds {value:?}, expected a non-negative integer")]
    Format { path: PathBuf, value: String },

    /// The counter already holds the largest representable folio.
    #[error("Folio counter exhausted at {last}")]
    Exhausted { last: u64 },

    /// The ledger header does not match the expected columns.
    #[error("Ledger {path} has columns {found:?}, expected {expected:?}")]
    Schema {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A ledger row could not be parsed or written.
    #[error("Ledger {path} is malformed: {message}")]
    Csv { path: PathBuf, message: String },
}

impl StoreError {
    /// Creates an Io error for the given file.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Maps a csv error, keeping I/O failures as [`StoreError::Io`].
    pub fn csv(path: impl AsRef<Path>, err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => StoreError::io(path, source),
            _ => StoreError::Csv {
                path: path.as_ref().to_path_buf(),
                message,
            },
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let err = StoreError::Format {
            path: PathBuf::from("folio.txt"),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Counter file folio.txt holds \"abc\", expected a non-negative integer"
        );
    }

    #[test]
    fn test_csv_io_error_maps_to_io() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::csv("clientes.csv", csv::Error::from(io));
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
