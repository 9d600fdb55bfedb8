//! App update functions
//!
//! Store synchronization, record creation, persistence and quit.

use std::collections::BTreeMap;

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{AppModel, FieldValue};

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::StoreChanged => store_changed(model),
        AppMsg::AddRecord(fields) => add_record(model, fields),
        AppMsg::Save => save(model),
        AppMsg::SaveCompleted(result) => {
            match result {
                Ok(()) => model.status = Some("Saved".to_string()),
                Err(e) => {
                    tracing::error!("Failed to save records: {}", e);
                    model.status = Some(format!("Save failed: {}", e));
                }
            }
            Some(Cmd::Redraw)
        }
        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Hand the grid a fresh snapshot; autosave when configured
fn store_changed(model: &mut AppModel) -> Option<Cmd> {
    if !model.store_is_ahead() {
        return None;
    }
    model.grid.set_records(model.store.records());
    model.seen_revision = model.store.revision();

    let mut cmds = vec![Cmd::Redraw];
    if model.config.autosave {
        if let Some(path) = &model.data_file {
            cmds.push(Cmd::SaveRecords { path: path.clone() });
        }
    }
    Some(Cmd::batch(cmds))
}

fn add_record(model: &mut AppModel, fields: BTreeMap<String, FieldValue>) -> Option<Cmd> {
    let id = model.store.insert(fields);
    model.status = Some(format!("Added record {}", id));
    Some(Cmd::batch(vec![Cmd::ReloadRecords, Cmd::Redraw]))
}

fn save(model: &mut AppModel) -> Option<Cmd> {
    match &model.data_file {
        Some(path) => Some(Cmd::SaveRecords { path: path.clone() }),
        None => {
            model.status = Some("Saving is disabled for this session".to_string());
            Some(Cmd::Redraw)
        }
    }
}
