//! # cotizador-render: Printable Quote Documents
//!
//! Turns an issued quote into the one-page PDF handed to the client.
//!
//! ## Pipeline Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  QuoteRequest + Quote + today                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteDocument::compose      (document.rs, pure)                        │
//! │       │   Title, Line, Gap, Note blocks                                 │
//! │       ▼                                                                 │
//! │  PdfRenderer::render         (pdf.rs)                                   │
//! │       │   layout → fonts.rs metrics, logo.rs image                      │
//! │       ▼                                                                 │
//! │  cotizacion.pdf  +  RenderedDocument { path, mime, size }               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - What goes on the page
//! - [`pdf`] - Where it goes, and the PDF writer
//! - [`fonts`] - Helvetica metrics and WinAnsi encoding
//! - [`logo`] - PNG / JPEG logo decoding
//! - [`error`] - Render error types

pub mod document;
pub mod error;
pub mod fonts;
pub mod logo;
pub mod pdf;

pub use document::{Block, QuoteDocument};
pub use error::{RenderError, RenderResult};
pub use pdf::{PdfRenderer, RenderedDocument, PDF_MIME};
