//! # Render Error Types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Document rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output file could not be written.
    ///
    /// ## When This Occurs
    /// - Output directory missing or read-only
    /// - Output path is a directory
    /// - Disk full
    #[error("Cannot write document to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The PDF object model could not be serialized.
    #[error("Cannot encode document: {0}")]
    Encode(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
