//! Grid update functions
//!
//! Handles GridMsg messages: clicks, keystrokes, blur and row deletion.

use crate::commands::Cmd;
use crate::grid::ClickOutcome;
use crate::messages::GridMsg;
use crate::model::AppModel;

/// Handle grid messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::Click { row, column } => click(model, row, &column),
        GridMsg::Input(text) => input(model, text),
        GridMsg::Blur => blur(model),
        GridMsg::DeleteRow(row) => delete_row(model, row),
    }
}

/// The open edit session, if any
fn focused(model: &AppModel) -> Option<(usize, String)> {
    model
        .grid
        .editing_cells()
        .into_iter()
        .next()
        .map(|(row, column)| (row, column.to_string()))
}

/// Blur the open edit session unless it is the cell at (row, column)
fn blur_other(model: &mut AppModel, row: usize, column: &str) {
    if let Some((r, c)) = focused(model) {
        if r != row || c != column {
            model.grid.blur(r, &c);
        }
    }
}

/// Redraw, plus a reload when the store moved ahead of the grid
fn after_store_call(model: &AppModel) -> Option<Cmd> {
    if model.store_is_ahead() {
        Some(Cmd::batch(vec![Cmd::ReloadRecords, Cmd::Redraw]))
    } else {
        Some(Cmd::Redraw)
    }
}

fn click(model: &mut AppModel, row: usize, column: &str) -> Option<Cmd> {
    blur_other(model, row, column);

    match model.grid.click(row, column) {
        ClickOutcome::Missing => {
            model.status = Some(format!("No cell at row {} column '{}'", row + 1, column));
            after_store_call(model)
        }
        ClickOutcome::ReadOnly => {
            model.status = Some(format!("Column '{}' is read-only", column));
            after_store_call(model)
        }
        ClickOutcome::Editing | ClickOutcome::AlreadyEditing => {
            model.status = None;
            after_store_call(model)
        }
        ClickOutcome::Action(action, id) => {
            model.status = Some(format!("{} {}", action.label(), id));
            after_store_call(model)
        }
    }
}

fn input(model: &mut AppModel, text: String) -> Option<Cmd> {
    let (row, column) = focused(model)?;
    if model.grid.input(row, &column, text) {
        Some(Cmd::Redraw)
    } else {
        None
    }
}

fn blur(model: &mut AppModel) -> Option<Cmd> {
    let (row, column) = focused(model)?;
    model.grid.blur(row, &column);
    after_store_call(model)
}

fn delete_row(model: &mut AppModel, row: usize) -> Option<Cmd> {
    let column = model
        .grid
        .schema()
        .columns()
        .iter()
        .find(|c| c.is_action())
        .map(|c| c.id.to_string());

    match column {
        Some(column) => click(model, row, &column),
        None => {
            blur_other(model, row, "");
            model.grid.delete_row(row)?;
            after_store_call(model)
        }
    }
}
