//! Editable grid
//!
//! ```text
//! Grid (controller)
//! ├── ColumnSchema        fixed, ordered columns
//! ├── Rc<[Record]>        current record snapshot
//! ├── CommitFn            one sink shared by every cell
//! ├── TableSnapshot       memoized headers/rows/cells
//! └── CellEditState       per (record, column), created on first touch
//! ```
//!
//! Edits flow `cell.blur → CommitFn(row, column, value) → update_cell_record
//! → RecordStore::update_record(id, patch)`. Deletes go straight from the
//! action column to `RecordStore::delete_record(id)`.

mod cell;
mod commit;
mod controller;
pub mod render;
mod snapshot;

pub use cell::{CellContext, CellEditState, CellMode};
pub use commit::{update_cell_record, CommitFn};
pub use controller::{CellKey, ClickOutcome, Grid};
pub use render::{render_table, RenderOptions};
pub use snapshot::{CellView, HeaderCell, RowView, TableSnapshot};
