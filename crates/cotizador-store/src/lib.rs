//! # cotizador-store: Persistence Layer for Cotizador
//!
//! Owns the two durable files of the quoting pipeline: the folio counter and
//! the ledger of issued quotes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cotizador Data Flow                              │
//! │                                                                         │
//! │  QuoteService::submit                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  cotizador-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐                  │   │
//! │  │   │    Store      │    │   Repositories     │                  │   │
//! │  │   │  (store.rs)   │───►│ FileFolioSequencer │                  │   │
//! │  │   │  StoreConfig  │    │ CsvLedger          │                  │   │
//! │  │   └───────────────┘    └────────────────────┘                  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  folio.txt ("0042")            clientes.csv (header + rows)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - File locations and repository construction
//! - [`repository`] - `FolioSequencer` / `Ledger` traits and backends
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cotizador_store::{FolioSequencer, Store, StoreConfig};
//!
//! # fn main() -> Result<(), cotizador_store::StoreError> {
//! let (mut folios, _ledger) = Store::open(StoreConfig::new("."))?.into_parts();
//! let folio = folios.next_folio()?;
//! println!("{folio}"); // COT 0001
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::folio::{FileFolioSequencer, MemoryFolioSequencer};
pub use repository::ledger::{CsvLedger, MemoryLedger};
pub use repository::{FolioSequencer, Ledger};
pub use store::{Store, StoreConfig};
