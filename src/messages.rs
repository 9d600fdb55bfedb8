//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::collections::BTreeMap;

use crate::model::FieldValue;

/// Grid interaction messages
#[derive(Debug, Clone)]
pub enum GridMsg {
    /// Click on a cell (0-based row, column id). Blurs any other open
    /// edit session first.
    Click { row: usize, column: String },
    /// Replace the text of the focused edit session
    Input(String),
    /// Focus left the editing cell: commit and return to display
    Blur,
    /// Click the delete control of a row
    DeleteRow(usize),
}

/// App messages (store sync, persistence, lifecycle)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// The record store has new data
    StoreChanged,
    /// Create a record with the given fields
    AddRecord(BTreeMap<String, FieldValue>),
    /// Persist records now
    Save,
    /// Save completed (result of a save command)
    SaveCompleted(Result<(), String>),
    /// Quit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Grid messages (cell editing, row actions)
    Grid(GridMsg),
    /// App messages
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn click(row: usize, column: &str) -> Self {
        Msg::Grid(GridMsg::Click {
            row,
            column: column.to_string(),
        })
    }

    pub fn input(text: &str) -> Self {
        Msg::Grid(GridMsg::Input(text.to_string()))
    }

    pub fn blur() -> Self {
        Msg::Grid(GridMsg::Blur)
    }
}
