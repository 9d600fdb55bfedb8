//! Grid controller
//!
//! Binds a record sequence and a column schema into a table snapshot and
//! owns the single commit function shared by every cell.
//!
//! # Snapshot stability
//!
//! The snapshot is memoized on the identity of the record sequence and of
//! the commit function. Handing the grid the same `Rc<[Record]>` again does
//! not rebuild anything; a new sequence or a new commit function does.
//!
//! # Cell state
//!
//! Edit state is keyed by (record identity, column id), so an open edit
//! session survives unrelated record changes and row reordering. State for
//! records that disappear from the sequence is dropped without committing.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::model::{
    ColumnDef, ColumnId, ColumnKind, ColumnSchema, FieldValue, Record, RecordId, RowAction,
};
use crate::store::RecordStore;

use super::cell::{CellContext, CellEditState, CellMode};
use super::commit::{update_cell_record, CommitFn};
use super::snapshot::TableSnapshot;

/// Key for per-cell edit state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub record: RecordId,
    pub column: ColumnId,
}

/// Result of a click on a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Edit session opened
    Editing,
    /// Cell was already editing, nothing changed
    AlreadyEditing,
    /// Column is read-only
    ReadOnly,
    /// A row action ran
    Action(RowAction, RecordId),
    /// No cell at that position
    Missing,
}

struct Memo {
    records: Rc<[Record]>,
    commit: CommitFn,
    table: Rc<TableSnapshot>,
}

pub struct Grid {
    schema: Rc<ColumnSchema>,
    records: Rc<[Record]>,
    store: Rc<dyn RecordStore>,
    commit: CommitFn,
    /// Commit function came from `set_commit_fn` and is kept across record
    /// updates
    custom_commit: bool,
    cells: HashMap<CellKey, CellEditState>,
    memo: RefCell<Option<Memo>>,
    builds: Cell<usize>,
}

impl Grid {
    pub fn new(schema: ColumnSchema, records: Rc<[Record]>, store: Rc<dyn RecordStore>) -> Self {
        let commit = CommitFn::for_records(records.clone(), store.clone());
        Self {
            schema: Rc::new(schema),
            records,
            store,
            commit,
            custom_commit: false,
            cells: HashMap::new(),
            memo: RefCell::new(None),
            builds: Cell::new(0),
        }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn records(&self) -> &Rc<[Record]> {
        &self.records
    }

    pub fn commit_fn(&self) -> &CommitFn {
        &self.commit
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Number of times the snapshot has been built
    pub fn snapshot_builds(&self) -> usize {
        self.builds.get()
    }

    /// Receive a fresh record sequence from the store.
    ///
    /// Passing the sequence the grid already holds is a no-op. Otherwise the
    /// store-backed commit function is rebound to the new sequence (one set
    /// through [`Grid::set_commit_fn`] is kept) and edit state for records
    /// that no longer exist is dropped.
    pub fn set_records(&mut self, records: Rc<[Record]>) {
        if Rc::ptr_eq(&self.records, &records) {
            return;
        }
        self.records = records;
        if !self.custom_commit {
            self.commit = CommitFn::for_records(self.records.clone(), self.store.clone());
        }

        let before = self.cells.len();
        let records = &self.records;
        self.cells
            .retain(|key, _| records.iter().any(|r| r.id == key.record));
        let dropped = before - self.cells.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped cell state for removed records");
        }
    }

    /// Replace the commit function shared by all cells. It stays in place
    /// across `set_records` until [`Grid::reset_commit_fn`].
    pub fn set_commit_fn(&mut self, commit: CommitFn) {
        self.commit = commit;
        self.custom_commit = true;
    }

    /// Go back to committing through the record store
    pub fn reset_commit_fn(&mut self) {
        self.commit = CommitFn::for_records(self.records.clone(), self.store.clone());
        self.custom_commit = false;
    }

    /// Table snapshot, rebuilt only when the record sequence or the commit
    /// function changed since the last call
    pub fn snapshot(&self) -> Rc<TableSnapshot> {
        let mut memo = self.memo.borrow_mut();
        if let Some(m) = memo.as_ref() {
            if Rc::ptr_eq(&m.records, &self.records) && m.commit.ptr_eq(&self.commit) {
                return m.table.clone();
            }
        }

        let table = Rc::new(TableSnapshot::build(&self.schema, &self.records));
        self.builds.set(self.builds.get() + 1);
        tracing::debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "table snapshot rebuilt"
        );
        *memo = Some(Memo {
            records: self.records.clone(),
            commit: self.commit.clone(),
            table: table.clone(),
        });
        table
    }

    /// Commit `value` for a cell through the store. Stale row indices are
    /// ignored.
    pub fn update_cell_record(
        &self,
        row_index: usize,
        column_id: &ColumnId,
        value: FieldValue,
    ) -> bool {
        update_cell_record(
            &self.records,
            self.store.as_ref(),
            row_index,
            column_id,
            value,
        )
    }

    fn locate(&self, row: usize, column: &str) -> Option<(&Record, &ColumnDef)> {
        let record = self.records.get(row)?;
        let col = self.schema.find(column)?;
        Some((record, col))
    }

    fn key(record: &Record, col: &ColumnDef) -> CellKey {
        CellKey {
            record: record.id.clone(),
            column: col.id.clone(),
        }
    }

    /// Edit state of a cell; cells never touched are in `Display`
    pub fn cell_state(&self, row: usize, column: &str) -> Option<&CellEditState> {
        let (record, col) = self.locate(row, column)?;
        self.cells.get(&Self::key(record, col))
    }

    pub fn cell_mode(&self, row: usize, column: &str) -> CellMode {
        self.cell_state(row, column)
            .map(CellEditState::mode)
            .unwrap_or_default()
    }

    /// Text a cell shows right now: pending input while editing, the
    /// record's value otherwise. `None` for action cells or missing cells.
    pub fn cell_text(&self, row: usize, column: &str) -> Option<String> {
        let (record, col) = self.locate(row, column)?;
        let current = col.resolve(record)?;
        Some(match self.cells.get(&Self::key(record, col)) {
            Some(state) => state.render(&current),
            None => current.display_text(),
        })
    }

    /// Click on a cell: opens an edit session on editable data cells, runs
    /// the row action on action cells.
    pub fn click(&mut self, row: usize, column: &str) -> ClickOutcome {
        let Some((record, col)) = self.locate(row, column) else {
            return ClickOutcome::Missing;
        };
        let key = Self::key(record, col);
        let current = col.resolve(record);
        let editable = col.editable();

        let Some(current) = current else {
            if let ColumnKind::Action(action) = col.kind {
                self.run_action(action, &key.record);
                return ClickOutcome::Action(action, key.record);
            }
            return ClickOutcome::Missing;
        };

        let state = self.cells.entry(key).or_default();
        if state.is_editing() {
            ClickOutcome::AlreadyEditing
        } else if state.activate(editable, &current) {
            tracing::debug!(row, column, "cell edit session started");
            ClickOutcome::Editing
        } else {
            ClickOutcome::ReadOnly
        }
    }

    fn run_action(&self, action: RowAction, id: &RecordId) {
        match action {
            RowAction::Delete => {
                tracing::debug!(record = %id, "delete requested");
                self.store.delete_record(id);
            }
        }
    }

    /// Keystroke in an editing cell: replace its pending value
    pub fn input(&mut self, row: usize, column: &str, text: impl Into<String>) -> bool {
        let Some((record, col)) = self.locate(row, column) else {
            return false;
        };
        let key = Self::key(record, col);
        self.cells
            .get_mut(&key)
            .map(|state| state.input(text))
            .unwrap_or(false)
    }

    /// Focus left the cell: commit and return to display
    pub fn blur(&mut self, row: usize, column: &str) -> bool {
        let Some((record, col)) = self.locate(row, column) else {
            return false;
        };
        let key = Self::key(record, col);
        let Some(state) = self.cells.get_mut(&key) else {
            return false;
        };
        state.blur(CellContext {
            row_index: row,
            column_id: &key.column,
            commit: &self.commit,
        })
    }

    /// Current positions (row index, column id) of every cell in an edit
    /// session, in row then column order
    pub fn editing_cells(&self) -> Vec<(usize, ColumnId)> {
        let mut editing: Vec<(usize, usize, ColumnId)> = self
            .cells
            .iter()
            .filter(|(_, state)| state.is_editing())
            .filter_map(|(key, _)| {
                let row = self.records.iter().position(|r| r.id == key.record)?;
                let col = self.schema.position(key.column.as_str())?;
                Some((row, col, key.column.clone()))
            })
            .collect();
        editing.sort_by_key(|(row, col, _)| (*row, *col));
        editing
            .into_iter()
            .map(|(row, _, column)| (row, column))
            .collect()
    }

    /// Delete the record at a row directly through the store
    pub fn delete_row(&self, row: usize) -> Option<RecordId> {
        let record = self.records.get(row)?;
        self.run_action(RowAction::Delete, &record.id);
        Some(record.id.clone())
    }
}
