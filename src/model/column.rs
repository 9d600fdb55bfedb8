//! Column schema
//!
//! Columns are a fixed, ordered sequence declared once. Each column is either
//! a data column (reads a value out of a record through its accessor) or an
//! action column (renders row-scoped controls and reads nothing).

use std::fmt;

use super::record::{FieldValue, Record};

/// Identifier of a column, unique within a schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How a data column reads its value from a record
#[derive(Debug, Clone)]
pub enum Accessor {
    /// Read the record field with this name
    Field(String),
    /// Derive the value with a function
    Computed(fn(&Record) -> FieldValue),
}

impl Accessor {
    pub fn resolve(&self, record: &Record) -> FieldValue {
        match self {
            Accessor::Field(name) => record.get(name),
            Accessor::Computed(f) => f(record),
        }
    }
}

/// Row-scoped action rendered by an action column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Delete,
}

impl RowAction {
    /// Label shown on the control
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Delete => "Delete",
        }
    }
}

/// What kind of cell a column produces
#[derive(Debug, Clone)]
pub enum ColumnKind {
    Data { accessor: Accessor, editable: bool },
    Action(RowAction),
}

/// A single column definition
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: String,
    pub kind: ColumnKind,
}

impl ColumnDef {
    /// Data column reading the field named after its id
    pub fn field(id: &str, header: &str, editable: bool) -> Self {
        Self {
            id: ColumnId::new(id),
            header: header.to_string(),
            kind: ColumnKind::Data {
                accessor: Accessor::Field(id.to_string()),
                editable,
            },
        }
    }

    /// Data column with a derived value
    pub fn computed(id: &str, header: &str, accessor: fn(&Record) -> FieldValue) -> Self {
        Self {
            id: ColumnId::new(id),
            header: header.to_string(),
            kind: ColumnKind::Data {
                accessor: Accessor::Computed(accessor),
                editable: false,
            },
        }
    }

    pub fn action(id: &str, header: &str, action: RowAction) -> Self {
        Self {
            id: ColumnId::new(id),
            header: header.to_string(),
            kind: ColumnKind::Action(action),
        }
    }

    /// Advisory flag consumed by the cell edit state machine.
    /// Action columns are never editable.
    pub fn editable(&self) -> bool {
        match &self.kind {
            ColumnKind::Data { editable, .. } => *editable,
            ColumnKind::Action(_) => false,
        }
    }

    /// Resolve this column's value for a record; `None` for action columns
    pub fn resolve(&self, record: &Record) -> Option<FieldValue> {
        match &self.kind {
            ColumnKind::Data { accessor, .. } => Some(accessor.resolve(record)),
            ColumnKind::Action(_) => None,
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, ColumnKind::Action(_))
    }
}

/// Error raised when a schema declares the same column id twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateColumn(pub ColumnId);

impl fmt::Display for DuplicateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duplicate column id: {}", self.0)
    }
}

impl std::error::Error for DuplicateColumn {}

/// Ordered, immutable column sequence
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    columns: Vec<ColumnDef>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, DuplicateColumn> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == col.id) {
                return Err(DuplicateColumn(col.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColumnDef> {
        self.columns.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id.as_str() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id.as_str() == id)
    }
}

/// The financial record table: four editable text columns, a read-only
/// date and a delete action
pub fn financial_record_columns() -> ColumnSchema {
    ColumnSchema {
        columns: vec![
            ColumnDef::field("description", "Description", true),
            ColumnDef::field("amount", "Amount", true),
            ColumnDef::field("category", "Category", true),
            ColumnDef::field("paymentMethod", "Payment Method", true),
            ColumnDef::field("date", "Date", false),
            ColumnDef::action("delete", "Delete", RowAction::Delete),
        ],
    }
}
