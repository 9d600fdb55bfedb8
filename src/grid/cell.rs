//! Cell edit state machine
//!
//! One instance per (row, column) pair. A cell is either showing its
//! record's value (`Display`) or holding a pending edit (`Editing`).
//!
//! ```text
//!            activate (editable only)
//!   Display ─────────────────────────▶ Editing ◀─┐
//!      ▲                                  │      │ input
//!      └──────── blur: commit once ───────┘──────┘
//! ```

use crate::model::{ColumnId, FieldValue};

use super::commit::CommitFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMode {
    #[default]
    Display,
    Editing,
}

/// Everything a cell needs to commit, passed in explicitly by the grid
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub row_index: usize,
    pub column_id: &'a ColumnId,
    pub commit: &'a CommitFn,
}

/// Transient edit state for a single cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellEditState {
    mode: CellMode,
    /// Only meaningful while editing
    pending: Option<FieldValue>,
}

impl CellEditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CellMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == CellMode::Editing
    }

    pub fn pending(&self) -> Option<&FieldValue> {
        self.pending.as_ref()
    }

    /// Activation gesture (click). Opens an edit session seeded with the
    /// cell's current value when the column is editable.
    ///
    /// Returns true when the cell entered `Editing`. Activating a read-only
    /// cell, or a cell that is already editing, changes nothing.
    pub fn activate(&mut self, editable: bool, current: &FieldValue) -> bool {
        if !editable {
            tracing::debug!("activation on read-only cell ignored");
            return false;
        }
        if self.is_editing() {
            return false;
        }
        self.mode = CellMode::Editing;
        self.pending = Some(current.clone());
        true
    }

    /// Replace the pending value with raw input text. Ignored outside an
    /// edit session.
    pub fn input(&mut self, text: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.pending = Some(FieldValue::Text(text.into()));
        true
    }

    /// End of the edit session: commit the pending value exactly once and
    /// return to `Display`. Blurring a cell that is not editing does nothing.
    pub fn blur(&mut self, ctx: CellContext<'_>) -> bool {
        if !self.is_editing() {
            return false;
        }
        let value = self.pending.take().unwrap_or_default();
        tracing::debug!(row = ctx.row_index, column = %ctx.column_id, "cell edit session ended");
        ctx.commit.call(ctx.row_index, ctx.column_id, value);
        self.mode = CellMode::Display;
        true
    }

    /// Text shown in the input while editing
    pub fn input_text(&self) -> Option<String> {
        if !self.is_editing() {
            return None;
        }
        Some(
            self.pending
                .as_ref()
                .map(FieldValue::input_text)
                .unwrap_or_default(),
        )
    }

    /// Text to show for this cell given the record's current value
    pub fn render(&self, current: &FieldValue) -> String {
        self.input_text()
            .unwrap_or_else(|| current.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(usize, String, FieldValue)>>>;

    fn recording_commit() -> (CommitFn, Calls) {
        let calls: Calls = Rc::default();
        let sink = calls.clone();
        let commit = CommitFn::new(move |row, col, value| {
            sink.borrow_mut().push((row, col.to_string(), value));
        });
        (commit, calls)
    }

    #[test]
    fn test_initial_state_is_display() {
        let cell = CellEditState::new();
        assert_eq!(cell.mode(), CellMode::Display);
        assert!(cell.pending().is_none());
    }

    #[test]
    fn test_read_only_activation_is_noop() {
        let mut cell = CellEditState::new();
        assert!(!cell.activate(false, &FieldValue::from("2024-01-01")));
        assert_eq!(cell.mode(), CellMode::Display);
        assert!(cell.pending().is_none());
    }

    #[test]
    fn test_activation_seeds_pending_with_current_value() {
        let mut cell = CellEditState::new();
        assert!(cell.activate(true, &FieldValue::Number(100.0)));
        assert_eq!(cell.mode(), CellMode::Editing);
        assert_eq!(cell.pending(), Some(&FieldValue::Number(100.0)));
        assert_eq!(cell.input_text().as_deref(), Some("100"));
    }

    #[test]
    fn test_second_activation_keeps_pending() {
        let mut cell = CellEditState::new();
        cell.activate(true, &FieldValue::from("a"));
        cell.input("ab");
        assert!(!cell.activate(true, &FieldValue::from("a")));
        assert_eq!(cell.pending(), Some(&FieldValue::from("ab")));
    }

    #[test]
    fn test_input_is_stored_as_text_without_coercion() {
        let mut cell = CellEditState::new();
        cell.activate(true, &FieldValue::Number(100.0));
        cell.input("25");
        cell.input("250");
        assert_eq!(cell.pending(), Some(&FieldValue::Text("250".into())));
    }

    #[test]
    fn test_input_outside_edit_session_ignored() {
        let mut cell = CellEditState::new();
        assert!(!cell.input("x"));
        assert!(cell.pending().is_none());
    }

    #[test]
    fn test_blur_commits_latest_value_once() {
        let (commit, calls) = recording_commit();
        let column = ColumnId::new("amount");
        let mut cell = CellEditState::new();

        cell.activate(true, &FieldValue::Number(100.0));
        cell.input("2");
        cell.input("25");
        // no commit per keystroke
        assert!(calls.borrow().is_empty());

        let ctx = CellContext {
            row_index: 3,
            column_id: &column,
            commit: &commit,
        };
        assert!(cell.blur(ctx));
        assert!(!cell.blur(ctx));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (3, "amount".to_string(), FieldValue::from("25")));
        assert_eq!(cell.mode(), CellMode::Display);
        assert!(cell.pending().is_none());
    }

    #[test]
    fn test_blur_without_input_commits_seeded_value() {
        let (commit, calls) = recording_commit();
        let column = ColumnId::new("description");
        let mut cell = CellEditState::new();

        cell.activate(true, &FieldValue::from("Rent"));
        cell.blur(CellContext {
            row_index: 0,
            column_id: &column,
            commit: &commit,
        });

        assert_eq!(calls.borrow()[0].2, FieldValue::from("Rent"));
    }

    #[test]
    fn test_empty_value_is_committed() {
        let (commit, calls) = recording_commit();
        let column = ColumnId::new("category");
        let mut cell = CellEditState::new();

        cell.activate(true, &FieldValue::from("Food"));
        cell.input("");
        cell.blur(CellContext {
            row_index: 0,
            column_id: &column,
            commit: &commit,
        });

        assert_eq!(calls.borrow()[0].2, FieldValue::from(""));
    }

    #[test]
    fn test_render_uses_record_value_after_commit() {
        let (commit, _calls) = recording_commit();
        let column = ColumnId::new("description");
        let mut cell = CellEditState::new();

        cell.activate(true, &FieldValue::from("old"));
        cell.input("new");
        assert_eq!(cell.render(&FieldValue::from("old")), "new");

        cell.blur(CellContext {
            row_index: 0,
            column_id: &column,
            commit: &commit,
        });
        // display derives from the record, not the discarded pending value
        assert_eq!(cell.render(&FieldValue::from("old")), "old");
        assert_eq!(cell.render(&FieldValue::Null), "");
        assert_eq!(cell.render(&FieldValue::Number(0.0)), "0");
    }
}
