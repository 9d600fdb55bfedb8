//! Record store
//!
//! The grid only ever talks to a [`RecordStore`]: it sends full-record
//! patches and deletions and never waits for them to complete. Whatever
//! the store does with a write (persist it, reject it, fail) is invisible
//! to the grid; fresh records come back as a new snapshot.
//!
//! [`MemoryStore`] is the in-process implementation used by the binary,
//! with JSON persistence and CSV import.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::model::{FieldValue, Record, RecordId, ID_FIELD};

/// Sink for record writes issued by the grid
pub trait RecordStore {
    /// Replace all fields of the record identified by `id` with `patch`'s fields
    fn update_record(&self, id: &RecordId, patch: Record);

    /// Remove the record identified by `id`
    fn delete_record(&self, id: &RecordId);
}

/// Error type for store file operations
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Csv { message: String, line: Option<usize> },
    /// Two records share an identity
    DuplicateId(RecordId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            StoreError::Json(e) => write!(f, "Invalid record JSON: {}", e),
            StoreError::Csv {
                message,
                line: Some(line),
            } => write!(f, "CSV import error at line {}: {}", line, message),
            StoreError::Csv {
                message,
                line: None,
            } => write!(f, "CSV import error: {}", message),
            StoreError::DuplicateId(id) => write!(f, "Duplicate record id '{}'", id),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Json(e) => Some(e),
            StoreError::Csv { .. } | StoreError::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// In-memory record store with a revision counter.
///
/// Every successful write bumps the revision so a caller can tell when to
/// hand a fresh snapshot back to the grid.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Record>>,
    revision: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: RefCell::new(records),
            revision: Cell::new(0),
        }
    }

    /// Store over loaded records, rejecting repeated identities
    fn from_loaded(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self::from_records(records))
    }

    /// Fresh snapshot of the current records, in insertion order
    pub fn records(&self) -> Rc<[Record]> {
        Rc::from(self.records.borrow().as_slice())
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Monotonic write counter
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records.borrow().iter().find(|r| &r.id == id).cloned()
    }

    /// Create a record with a freshly assigned identity
    pub fn insert(&self, fields: BTreeMap<String, FieldValue>) -> RecordId {
        let id = RecordId::new(uuid::Uuid::new_v4().simple().to_string());
        let mut record = Record::new(id.clone());
        for (name, value) in fields {
            record.set(&name, value);
        }
        self.records.borrow_mut().push(record);
        self.bump();
        tracing::info!("Created record {}", id);
        id
    }

    fn bump(&self) {
        self.revision.set(self.revision.get() + 1);
    }

    /// Parse a JSON array of records
    pub fn from_json_str(content: &str) -> Result<Self, StoreError> {
        let records: Vec<Record> = serde_json::from_str(content)?;
        Self::from_loaded(records)
    }

    pub fn to_json_string(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&*self.records.borrow())?)
    }

    /// Load records from a JSON file. A missing file yields an empty store.
    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!("No records file at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&content)?;
        tracing::info!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Write all records to a JSON file, creating the parent directory
    pub fn save_json(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let content = self.to_json_string()?;
        std::fs::write(path, content).map_err(io_err)?;
        tracing::info!("Saved {} records to {}", self.len(), path.display());
        Ok(())
    }

    /// Import records from CSV text with a header row.
    ///
    /// A `_id` column supplies identities; rows without one get a fresh id.
    /// `amount` cells that parse as finite numbers become numbers, `date`
    /// cells that parse as RFC 3339 become dates, empty cells become null.
    /// Two rows with the same `_id` are an error.
    pub fn from_csv_str(content: &str) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(Cursor::new(content.as_bytes()));

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| StoreError::Csv {
                message: e.to_string(),
                line: Some(1),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let row = result.map_err(|e| StoreError::Csv {
                message: e.to_string(),
                line: Some(row_num + 2),
            })?;

            let mut id = None;
            let mut fields = BTreeMap::new();
            for (name, cell) in headers.iter().zip(row.iter()) {
                if name == ID_FIELD {
                    if !cell.is_empty() {
                        id = Some(RecordId::new(cell));
                    }
                    continue;
                }
                fields.insert(name.clone(), import_cell(name, cell));
            }

            let id = id.unwrap_or_else(|| RecordId::new(uuid::Uuid::new_v4().simple().to_string()));
            records.push(Record { id, fields });
        }

        Self::from_loaded(records)
    }

    pub fn import_csv(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_csv_str(&content)?;
        tracing::info!("Imported {} records from {}", store.len(), path.display());
        Ok(store)
    }
}

fn import_cell(name: &str, cell: &str) -> FieldValue {
    if cell.is_empty() {
        return FieldValue::Null;
    }
    match name {
        // NaN and infinities have no JSON form; keep them as text
        "amount" => match cell.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::from(cell),
        },
        _ => FieldValue::from(cell).typed_for_field(name),
    }
}

impl RecordStore for MemoryStore {
    fn update_record(&self, id: &RecordId, patch: Record) {
        let updated = {
            let mut records = self.records.borrow_mut();
            match records.iter_mut().find(|r| &r.id == id) {
                Some(record) => {
                    record.fields = patch.fields;
                    true
                }
                None => false,
            }
        };
        if updated {
            self.bump();
            tracing::info!("Updated record {}", id);
        } else {
            tracing::warn!("Update for unknown record {} ignored", id);
        }
    }

    fn delete_record(&self, id: &RecordId) {
        let removed = {
            let mut records = self.records.borrow_mut();
            let before = records.len();
            records.retain(|r| &r.id != id);
            records.len() != before
        };
        if removed {
            self.bump();
            tracing::info!("Deleted record {}", id);
        } else {
            tracing::warn!("Delete for unknown record {} ignored", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryStore {
        MemoryStore::from_records(vec![
            Record::new("1")
                .with("description", "Rent")
                .with("amount", 1200.0),
            Record::new("2")
                .with("description", "Coffee")
                .with("amount", 3.5),
        ])
    }

    #[test]
    fn test_update_replaces_fields_and_bumps_revision() {
        let store = sample();
        let patch = Record::new("1").with("description", "Mortgage");
        store.update_record(&RecordId::new("1"), patch);

        let record = store.get(&RecordId::new("1")).unwrap();
        assert_eq!(record.get("description"), FieldValue::from("Mortgage"));
        // full replacement: amount was not in the patch
        assert!(record.get("amount").is_null());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_update_ignores_patch_identity() {
        let store = sample();
        let patch = Record::new("999").with("description", "Other");
        store.update_record(&RecordId::new("2"), patch);

        assert!(store.get(&RecordId::new("999")).is_none());
        assert_eq!(
            store.get(&RecordId::new("2")).unwrap().get("description"),
            FieldValue::from("Other")
        );
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let store = sample();
        store.update_record(&RecordId::new("x"), Record::new("x"));
        store.delete_record(&RecordId::new("x"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_delete_removes_record() {
        let store = sample();
        store.delete_record(&RecordId::new("1"));
        let ids: Vec<String> = store.records().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(BTreeMap::new());
        let b = store.insert(BTreeMap::new());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_records_snapshot_is_detached() {
        let store = sample();
        let snapshot = store.records();
        store.delete_record(&RecordId::new("1"));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_csv_import_types_known_columns() {
        let csv = "_id,description,amount,date\n\
                   a1,Lunch,12.50,2024-02-01T12:00:00Z\n\
                   ,Bus,n/a,yesterday\n";
        let store = MemoryStore::from_csv_str(csv).unwrap();
        let records = store.records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "a1");
        assert_eq!(records[0].get("amount"), FieldValue::Number(12.5));
        assert!(matches!(records[0].get("date"), FieldValue::Date(_)));

        assert!(!records[1].id.as_str().is_empty());
        assert_eq!(records[1].get("amount"), FieldValue::from("n/a"));
        assert_eq!(records[1].get("date"), FieldValue::from("yesterday"));
    }

    #[test]
    fn test_csv_import_keeps_non_finite_amounts_as_text() {
        let csv = "_id,amount\na,NaN\nb,inf\nc,-2\n";
        let store = MemoryStore::from_csv_str(csv).unwrap();
        let records = store.records();

        assert_eq!(records[0].get("amount"), FieldValue::from("NaN"));
        assert_eq!(records[1].get("amount"), FieldValue::from("inf"));
        assert_eq!(records[2].get("amount"), FieldValue::Number(-2.0));
        assert!(store.to_json_string().unwrap().contains("\"NaN\""));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let csv = "_id,description\na,Rent\na,Coffee\n";
        let err = MemoryStore::from_csv_str(csv).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(ref id) if id.as_str() == "a"));

        let json = r#"[{"_id":"x"},{"_id":"x"}]"#;
        assert!(matches!(
            MemoryStore::from_json_str(json),
            Err(StoreError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_invalid_json_reports_error() {
        let err = MemoryStore::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid record JSON"));
    }
}
