//! The shared commit sink
//!
//! Every cell of a table holds the same [`CommitFn`]. Calling it is the only
//! way a cell can affect the record store.

use std::fmt;
use std::rc::Rc;

use crate::model::{ColumnId, FieldValue, Record};
use crate::store::RecordStore;

type CommitCallback = dyn Fn(usize, &ColumnId, FieldValue);

/// Shared `(row_index, column_id, value)` sink.
///
/// Clones share the same callback; [`CommitFn::ptr_eq`] compares identity,
/// which the grid uses to decide when its snapshot is stale.
#[derive(Clone)]
pub struct CommitFn(Rc<CommitCallback>);

impl CommitFn {
    pub fn new(f: impl Fn(usize, &ColumnId, FieldValue) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Commit function bound to a record snapshot and a store
    pub fn for_records(records: Rc<[Record]>, store: Rc<dyn RecordStore>) -> Self {
        Self::new(move |row_index, column_id, value| {
            update_cell_record(&records, store.as_ref(), row_index, column_id, value);
        })
    }

    pub fn call(&self, row_index: usize, column_id: &ColumnId, value: FieldValue) {
        (self.0)(row_index, column_id, value)
    }

    pub fn ptr_eq(&self, other: &CommitFn) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CommitFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitFn({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Resolve `records[row_index]` and send a full-record patch with
/// `column_id` set to `value`.
///
/// A row index with no record behind it (stale after a deletion) is a
/// no-op. Returns whether the store was called. The value is sent as-is:
/// no coercion, no dirty check.
pub fn update_cell_record(
    records: &[Record],
    store: &dyn RecordStore,
    row_index: usize,
    column_id: &ColumnId,
    value: FieldValue,
) -> bool {
    let Some(current) = records.get(row_index) else {
        tracing::debug!(
            row = row_index,
            column = %column_id,
            "commit for missing row ignored"
        );
        return false;
    };

    let patch = current.patched(column_id.as_str(), value);
    tracing::debug!(record = %current.id, column = %column_id, "committing cell edit");
    store.update_record(&current.id, patch);
    true
}
