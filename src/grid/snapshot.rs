//! Renderable table structure
//!
//! A snapshot is derived from a column schema and a record sequence. It
//! holds resolved values only; per-cell edit state lives on the grid.

use crate::model::{ColumnId, ColumnKind, ColumnSchema, FieldValue, Record, RecordId, RowAction};

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column_id: ColumnId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    Data {
        column_id: ColumnId,
        value: FieldValue,
        editable: bool,
    },
    Action {
        column_id: ColumnId,
        action: RowAction,
    },
}

impl CellView {
    pub fn column_id(&self) -> &ColumnId {
        match self {
            CellView::Data { column_id, .. } | CellView::Action { column_id, .. } => column_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub index: usize,
    pub record_id: RecordId,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSnapshot {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
}

impl TableSnapshot {
    /// One header per column, one row per record, one cell per column in
    /// schema order
    pub fn build(schema: &ColumnSchema, records: &[Record]) -> Self {
        let headers = schema
            .columns()
            .iter()
            .map(|col| HeaderCell {
                column_id: col.id.clone(),
                label: col.header.clone(),
            })
            .collect();

        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| RowView {
                index,
                record_id: record.id.clone(),
                cells: schema
                    .columns()
                    .iter()
                    .map(|col| match &col.kind {
                        ColumnKind::Data { accessor, editable } => CellView::Data {
                            column_id: col.id.clone(),
                            value: accessor.resolve(record),
                            editable: *editable,
                        },
                        ColumnKind::Action(action) => CellView::Action {
                            column_id: col.id.clone(),
                            action: *action,
                        },
                    })
                    .collect(),
            })
            .collect();

        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }
}
