//! # Repository Module
//!
//! Persistence contracts for the quoting pipeline and their backends.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  QuoteService (apps/cli)                                               │
//! │       │                                                                 │
//! │       │  folios.next_folio()          ledger.append(&record)           │
//! │       ▼                               ▼                                 │
//! │  FolioSequencer (trait)          Ledger (trait)                        │
//! │  ├── FileFolioSequencer          ├── CsvLedger                         │
//! │  └── MemoryFolioSequencer        └── MemoryLedger                      │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  folio.txt                       clientes.csv                           │
//! │                                                                         │
//! │  Pricing and rendering never see which backend is in use.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Both file backends do read-modify-write without any cross-process lock.
//! Two processes issuing quotes at the same time can hand out the same folio
//! or drop a ledger row. Within one process, `&mut self` on every mutating
//! method gives the caller exclusive access.

pub mod folio;
pub mod ledger;

use cotizador_core::{Folio, LedgerRecord};

use crate::error::StoreResult;

/// Issues sequential folios.
pub trait FolioSequencer {
    /// Advances the counter and returns the newly issued folio.
    ///
    /// The first call on an empty store returns `COT 0001`.
    fn next_folio(&mut self) -> StoreResult<Folio>;

    /// The last issued folio, without advancing. `None` before the first.
    fn current(&self) -> StoreResult<Option<Folio>>;
}

/// Append-only record of issued quotes.
pub trait Ledger {
    /// Appends one row after all existing rows.
    fn append(&mut self, record: &LedgerRecord) -> StoreResult<()>;

    /// Every row, oldest first.
    fn records(&self) -> StoreResult<Vec<LedgerRecord>>;
}
