//! Data model types
//!
//! - `record`: records and dynamic field values
//! - `column`: the column schema (data and action columns)
//! - `app`: the application model driven by `update`

pub mod app;
pub mod column;
pub mod record;

pub use app::AppModel;
pub use column::{
    financial_record_columns, Accessor, ColumnDef, ColumnId, ColumnKind, ColumnSchema,
    DuplicateColumn, RowAction,
};
pub use record::{FieldValue, Record, RecordId, DATE_FIELD, ID_FIELD};
