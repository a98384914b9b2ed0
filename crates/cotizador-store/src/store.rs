//! # Store Configuration
//!
//! Locates the counter and ledger files and hands out their repositories.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  StoreConfig::new(data_dir)          ← default file names               │
//! │       │   .folio_path(..) / .ledger_path(..) overrides                  │
//! │       ▼                                                                 │
//! │  Store::open(config)                 ← creates missing parent dirs      │
//! │       │                                                                 │
//! │       ├──► FileFolioSequencer (folio.txt)                               │
//! │       └──► CsvLedger          (clientes.csv)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::folio::FileFolioSequencer;
use crate::repository::ledger::CsvLedger;

/// Default counter file name.
pub const DEFAULT_FOLIO_FILE: &str = "folio.txt";

/// Default ledger file name.
pub const DEFAULT_LEDGER_FILE: &str = "clientes.csv";

// =============================================================================
// Configuration
// =============================================================================

/// Where the durable files live.
///
/// ## Example
/// ```rust
/// use cotizador_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/cotizador").ledger_path("/srv/clientes.csv");
/// assert!(config.folio_path.ends_with("folio.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Folio counter file.
    pub folio_path: PathBuf,

    /// Ledger CSV file.
    pub ledger_path: PathBuf,
}

impl StoreConfig {
    /// Both files under `dir` with their default names.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        StoreConfig {
            folio_path: dir.join(DEFAULT_FOLIO_FILE),
            ledger_path: dir.join(DEFAULT_LEDGER_FILE),
        }
    }

    /// Overrides the counter file.
    pub fn folio_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.folio_path = path.into();
        self
    }

    /// Overrides the ledger file.
    pub fn ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// File-backed repositories, ready to use.
#[derive(Debug, Clone)]
pub struct Store {
    folios: FileFolioSequencer,
    ledger: CsvLedger,
}

impl Store {
    /// Opens the store, creating missing parent directories.
    ///
    /// The files themselves are created lazily by the first folio and the
    /// first ledger append.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        for path in [&config.folio_path, &config.ledger_path] {
            ensure_parent(path)?;
        }

        info!(
            folio_path = %config.folio_path.display(),
            ledger_path = %config.ledger_path.display(),
            "Store opened"
        );

        Ok(Store {
            folios: FileFolioSequencer::new(config.folio_path),
            ledger: CsvLedger::new(config.ledger_path),
        })
    }

    pub fn folios(&self) -> &FileFolioSequencer {
        &self.folios
    }

    pub fn ledger(&self) -> &CsvLedger {
        &self.ledger
    }

    /// Splits the store into its two repositories.
    pub fn into_parts(self) -> (FileFolioSequencer, CsvLedger) {
        (self.folios, self.ledger)
    }
}

fn ensure_parent(path: &Path) -> StoreResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!(dir = %parent.display(), "Creating data directory");
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))
        }
        _ => Ok(()),
    }
}
