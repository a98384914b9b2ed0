//! # Folio Repository
//!
//! Sequential folio counter.
//!
//! ## Counter Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Counter Lifecycle                                 │
//! │                                                                         │
//! │  folio.txt absent ──► next_folio() ──► writes "0001" ──► COT 0001       │
//! │                                                                         │
//! │  folio.txt "0041" ──► next_folio() ──► writes "0042" ──► COT 0042       │
//! │                                                                         │
//! │  folio.txt "abc"  ──► next_folio() ──► StoreError::Format (untouched)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file holds the last issued number zero-padded to four digits. Numbers
//! past 9999 are written with as many digits as they need.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use cotizador_core::Folio;

use super::FolioSequencer;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// File Backend
// =============================================================================

/// Folio counter persisted as a single text file.
#[derive(Debug, Clone)]
pub struct FileFolioSequencer {
    path: PathBuf,
}

impl FileFolioSequencer {
    /// Creates a sequencer over the given counter file. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFolioSequencer { path: path.into() }
    }

    /// Path of the counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored number, `None` when the file does not exist.
    fn read_counter(&self) -> StoreResult<Option<u64>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let value = raw.trim();
        value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| StoreError::Format {
                path: self.path.clone(),
                value: value.to_string(),
            })
    }
}

impl FolioSequencer for FileFolioSequencer {
    fn next_folio(&mut self) -> StoreResult<Folio> {
        let folio = match self.read_counter()? {
            None => Folio::FIRST,
            Some(last) => Folio::new(last)
                .next()
                .ok_or(StoreError::Exhausted { last })?,
        };

        fs::write(&self.path, folio.padded()).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), number = folio.number(), "Counter advanced");
        info!(folio = %folio, "Folio issued");
        Ok(folio)
    }

    fn current(&self) -> StoreResult<Option<Folio>> {
        Ok(self.read_counter()?.map(Folio::new))
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Counter kept in memory (tests, dry runs).
#[derive(Debug, Clone, Default)]
pub struct MemoryFolioSequencer {
    last: Option<Folio>,
}

impl MemoryFolioSequencer {
    /// A counter that has issued nothing yet.
    pub fn new() -> Self {
        MemoryFolioSequencer::default()
    }
}

impl FolioSequencer for MemoryFolioSequencer {
    fn next_folio(&mut self) -> StoreResult<Folio> {
        let folio = match self.last {
            None => Folio::FIRST,
            Some(last) => last.next().ok_or(StoreError::Exhausted {
                last: last.number(),
            })?,
        };
        self.last = Some(folio);
        Ok(folio)
    }

    fn current(&self) -> StoreResult<Option<Folio>> {
        Ok(self.last)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sequencer(dir: &TempDir) -> FileFolioSequencer {
        FileFolioSequencer::new(dir.path().join("folio.txt"))
    }

    #[test]
    fn test_first_folio_creates_file() {
        let dir = TempDir::new().unwrap();
        let mut seq = sequencer(&dir);

        assert_eq!(seq.current().unwrap(), None);
        assert_eq!(seq.next_folio().unwrap().to_string(), "COT 0001");
        assert_eq!(fs::read_to_string(seq.path()).unwrap(), "0001");
    }

    #[test]
    fn test_successive_folios() {
        let dir = TempDir::new().unwrap();
        let mut seq = sequencer(&dir);

        let issued: Vec<String> = (0..3).map(|_| seq.next_folio().unwrap().to_string()).collect();
        assert_eq!(issued, ["COT 0001", "COT 0002", "COT 0003"]);
        assert_eq!(seq.current().unwrap(), Some(Folio::new(3)));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        sequencer(&dir).next_folio().unwrap();
        sequencer(&dir).next_folio().unwrap();

        let folio = sequencer(&dir).next_folio().unwrap();
        assert_eq!(folio, Folio::new(3));
    }

    #[test]
    fn test_existing_counter_is_incremented() {
        let dir = TempDir::new().unwrap();
        let seq_path = dir.path().join("folio.txt");
        fs::write(&seq_path, "0041\n").unwrap();

        let mut seq = FileFolioSequencer::new(&seq_path);
        assert_eq!(seq.next_folio().unwrap().to_string(), "COT 0042");
        assert_eq!(fs::read_to_string(&seq_path).unwrap(), "0042");
    }

    #[test]
    fn test_width_grows_past_9999() {
        let dir = TempDir::new().unwrap();
        let seq_path = dir.path().join("folio.txt");
        fs::write(&seq_path, "9998").unwrap();

        let mut seq = FileFolioSequencer::new(&seq_path);
        assert_eq!(seq.next_folio().unwrap().to_string(), "COT 9999");
        assert_eq!(seq.next_folio().unwrap().to_string(), "COT 10000");
        assert_eq!(fs::read_to_string(&seq_path).unwrap(), "10000");
    }

    #[test]
    fn test_corrupt_counter_is_format_error() {
        let dir = TempDir::new().unwrap();
        let seq_path = dir.path().join("folio.txt");

        for bad in ["abc", "", "-3", "12.5"] {
            fs::write(&seq_path, bad).unwrap();
            let mut seq = FileFolioSequencer::new(&seq_path);
            let err = seq.next_folio().unwrap_err();
            assert!(matches!(err, StoreError::Format { .. }), "{bad:?}: {err}");
            // The bad value is left in place
            assert_eq!(fs::read_to_string(&seq_path).unwrap(), bad);
        }
    }

    #[test]
    fn test_unwritable_location_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut seq = FileFolioSequencer::new(dir.path().join("missing").join("folio.txt"));
        let err = seq.next_folio().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_memory_sequencer() {
        let mut seq = MemoryFolioSequencer::new();
        assert_eq!(seq.next_folio().unwrap(), Folio::FIRST);
        assert_eq!(seq.next_folio().unwrap(), Folio::new(2));
        assert_eq!(seq.current().unwrap(), Some(Folio::new(2)));
    }

    #[test]
    fn test_counter_beyond_u32_keeps_counting() {
        let dir = TempDir::new().unwrap();
        let seq_path = dir.path().join("folio.txt");
        fs::write(&seq_path, "4294967295").unwrap();

        let mut seq = FileFolioSequencer::new(&seq_path);
        assert_eq!(seq.next_folio().unwrap().to_string(), "COT 4294967296");
        assert_eq!(seq.next_folio().unwrap().to_string(), "COT 4294967297");
        assert_eq!(fs::read_to_string(&seq_path).unwrap(), "4294967297");
    }

    #[test]
    fn test_exhausted_counter_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let seq_path = dir.path().join("folio.txt");
        let last = u64::MAX.to_string();
        fs::write(&seq_path, &last).unwrap();

        let err = FileFolioSequencer::new(&seq_path).next_folio().unwrap_err();
        assert!(matches!(err, StoreError::Exhausted { last } if last == u64::MAX));
        assert_eq!(fs::read_to_string(&seq_path).unwrap(), last);
    }
}
