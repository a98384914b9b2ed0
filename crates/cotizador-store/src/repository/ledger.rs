//! # Ledger Repository
//!
//! Append-only record of issued quotes.
//!
//! ## Append Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         append(record)                                  │
//! │                                                                         │
//! │  1. READ   clientes.csv (absent or empty → no rows)                    │
//! │            └── header ≠ expected columns → StoreError::Schema          │
//! │                                                                         │
//! │  2. WRITE  clientes.csv.tmp                                            │
//! │            ├── header                                                  │
//! │            ├── existing rows, field for field                          │
//! │            └── the new row                                             │
//! │                                                                         │
//! │  3. RENAME clientes.csv.tmp → clientes.csv                             │
//! │                                                                         │
//! │  Any failure in 2 or 3 removes clientes.csv.tmp and leaves             │
//! │  clientes.csv as it was.                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Existing rows are copied as raw fields, never re-parsed into
//! [`LedgerRecord`] on the way through, so their formatting is preserved.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use cotizador_core::LedgerRecord;

use super::Ledger;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// CSV Backend
// =============================================================================

/// Ledger stored as a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// Creates a ledger over the given file. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvLedger { path: path.into() }
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the rewrite goes to before it replaces the ledger.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Reads the header and raw rows. Absent or zero-length file → no rows.
    fn load(&self) -> StoreResult<Option<(csv::StringRecord, Vec<csv::StringRecord>)>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let len = file
            .metadata()
            .map_err(|e| StoreError::io(&self.path, e))?
            .len();
        if len == 0 {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| StoreError::csv(&self.path, e))?
            .clone();

        if !headers.iter().eq(LedgerRecord::COLUMNS.iter().copied()) {
            return Err(StoreError::Schema {
                path: self.path.clone(),
                expected: LedgerRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: headers.iter().map(|c| c.to_string()).collect(),
            });
        }

        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::csv(&self.path, e))?;

        Ok(Some((headers, rows)))
    }

    /// Writes header + rows + the new record to the staging file, then
    /// renames it over the ledger. On failure the staging file is removed
    /// and the ledger keeps its previous content.
    fn rewrite(&self, rows: &[csv::StringRecord], record: &LedgerRecord) -> StoreResult<()> {
        let staging = self.staging_path();

        let result = write_staging(&staging, rows, record).and_then(|()| {
            fs::rename(&staging, &self.path).map_err(|e| StoreError::io(&self.path, e))
        });

        if result.is_err() {
            match fs::remove_file(&staging) {
                Ok(()) => debug!(path = %staging.display(), "Staging file removed"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %staging.display(), error = %e, "Staging file left behind"),
            }
        }
        result
    }
}

fn write_staging(
    staging: &Path,
    rows: &[csv::StringRecord],
    record: &LedgerRecord,
) -> StoreResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(staging)
        .map_err(|e| StoreError::csv(staging, e))?;
    writer
        .write_record(LedgerRecord::COLUMNS)
        .map_err(|e| StoreError::csv(staging, e))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| StoreError::csv(staging, e))?;
    }
    writer
        .write_record(record.fields())
        .map_err(|e| StoreError::csv(staging, e))?;
    writer.flush().map_err(|e| StoreError::io(staging, e))
}

impl Ledger for CsvLedger {
    fn append(&mut self, record: &LedgerRecord) -> StoreResult<()> {
        let rows = match self.load()? {
            Some((_, rows)) => rows,
            None => {
                debug!(path = %self.path.display(), "Creating ledger");
                Vec::new()
            }
        };

        self.rewrite(&rows, record)?;

        info!(folio = %record.folio, rows = rows.len() + 1, "Ledger row appended");
        Ok(())
    }

    fn records(&self) -> StoreResult<Vec<LedgerRecord>> {
        let Some((headers, rows)) = self.load()? else {
            return Ok(Vec::new());
        };

        rows.iter()
            .map(|row| {
                row.deserialize::<LedgerRecord>(Some(&headers))
                    .map_err(|e| StoreError::csv(&self.path, e))
            })
            .collect()
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Ledger kept in memory (tests, dry runs).
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    rows: Vec<LedgerRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        MemoryLedger::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Ledger for MemoryLedger {
    fn append(&mut self, record: &LedgerRecord) -> StoreResult<()> {
        self.rows.push(record.clone());
        Ok(())
    }

    fn records(&self) -> StoreResult<Vec<LedgerRecord>> {
        Ok(self.rows.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(folio: &str, name: &str, total: &str) -> LedgerRecord {
        LedgerRecord {
            folio: folio.to_string(),
            client_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555 000 0000".to_string(),
            service_date: "16/09/2024".to_string(),
            start_time: "07:00".to_string(),
            equipment: "Retroexcavadora, Camión de volteo".to_string(),
            total: total.to_string(),
        }
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("clientes.csv"));

        ledger.append(&record("COT 0001", "Ana", "4860.00")).unwrap();

        let text = fs::read_to_string(ledger.path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Folio,Nombre,Correo,Teléfono,Fecha de servicio,Hora,Equipos,Total")
        );
        assert_eq!(
            lines.next(),
            Some("COT 0001,Ana,ana@example.com,555 000 0000,16/09/2024,07:00,\"Retroexcavadora, Camión de volteo\",4860.00")
        );
        assert_eq!(lines.next(), None);
        assert!(!ledger.staging_path().exists());
    }

    #[test]
    fn test_appends_preserve_order() {
        let dir = TempDir::new().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("clientes.csv"));
        let r1 = record("COT 0001", "Ana", "4860.00");
        let r2 = record("COT 0002", "Luis", "4050.00");

        ledger.append(&r1).unwrap();
        assert_eq!(ledger.records().unwrap(), vec![r1.clone()]);

        ledger.append(&r2).unwrap();
        assert_eq!(ledger.records().unwrap(), vec![r1, r2]);
    }

    #[test]
    fn test_existing_rows_are_not_reformatted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        fs::write(
            &path,
            "Folio,Nombre,Correo,Teléfono,Fecha de servicio,Hora,Equipos,Total\n\
             COT 0001,Ana,ana@example.com,5551234,01/02/2024,07:00,Generador,1620.0\n",
        )
        .unwrap();

        let mut ledger = CsvLedger::new(&path);
        ledger.append(&record("COT 0002", "Luis", "4050.00")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text
            .lines()
            .any(|l| l == "COT 0001,Ana,ana@example.com,5551234,01/02/2024,07:00,Generador,1620.0"));

        let rows = ledger.records().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total, "1620.0");
        assert_eq!(rows[1].folio, "COT 0002");
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        let original = "Folio,Nombre,Total\nCOT 0001,Ana,10\n";
        fs::write(&path, original).unwrap();

        let mut ledger = CsvLedger::new(&path);
        let err = ledger.append(&record("COT 0002", "Luis", "1.00")).unwrap_err();
        assert!(matches!(err, StoreError::Schema { .. }));

        // Store left untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_empty_file_is_a_fresh_ledger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        fs::write(&path, "").unwrap();

        let mut ledger = CsvLedger::new(&path);
        assert!(ledger.records().unwrap().is_empty());
        ledger.append(&record("COT 0001", "Ana", "1.00")).unwrap();
        assert_eq!(ledger.records().unwrap().len(), 1);
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        fs::write(
            &path,
            "Folio,Nombre,Correo,Teléfono,Fecha de servicio,Hora,Equipos,Total\nCOT 0001,Ana\n",
        )
        .unwrap();

        let ledger = CsvLedger::new(&path);
        assert!(matches!(ledger.records().unwrap_err(), StoreError::Csv { .. }));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("missing").join("clientes.csv"));

        let err = ledger.append(&record("COT 0001", "Ana", "1.00")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_directory_at_ledger_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "sin cambios").unwrap();

        let mut ledger = CsvLedger::new(&path);
        assert!(matches!(ledger.records().unwrap_err(), StoreError::Io { .. }));

        let err = ledger.append(&record("COT 0001", "Ana", "1.00")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        assert!(path.is_dir());
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "sin cambios");
        assert!(!ledger.staging_path().exists());
    }

    #[test]
    fn test_unwritable_staging_leaves_ledger_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        let mut ledger = CsvLedger::new(&path);
        ledger.append(&record("COT 0001", "Ana", "4860.00")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory where the staging file would go
        fs::create_dir(ledger.staging_path()).unwrap();

        let err = ledger.append(&record("COT 0002", "Luis", "4050.00")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(ledger.records().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_rename_removes_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clientes.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "sin cambios").unwrap();

        // Staging is written in full, then the rename onto a directory fails
        let ledger = CsvLedger::new(&path);
        let err = ledger
            .rewrite(&[], &record("COT 0001", "Ana", "1.00"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        assert!(!ledger.staging_path().exists());
        assert!(path.is_dir());
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "sin cambios");
    }

    #[test]
    fn test_memory_ledger() {
        let mut ledger = MemoryLedger::new();
        assert!(ledger.is_empty());
        ledger.append(&record("COT 0001", "Ana", "1.00")).unwrap();
        ledger.append(&record("COT 0002", "Luis", "2.00")).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records().unwrap()[1].client_name, "Luis");
    }
}
