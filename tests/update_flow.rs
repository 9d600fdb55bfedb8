//! Message flow tests
//!
//! Drive `update` with messages against a real `MemoryStore` and check the
//! returned commands and the resulting model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ledger_grid::config::GridConfig;
use ledger_grid::messages::{AppMsg, GridMsg, Msg};
use ledger_grid::model::{AppModel, FieldValue, Record, RecordId};
use ledger_grid::store::MemoryStore;
use ledger_grid::update::update;
use ledger_grid::Cmd;

fn model(autosave: bool, data_file: Option<PathBuf>) -> AppModel {
    let store = MemoryStore::from_records(vec![
        Record::new("1")
            .with("description", "Rent")
            .with("amount", 900.0),
        Record::new("42")
            .with("description", "Train")
            .with("amount", 12.5),
    ]);
    let config = GridConfig {
        autosave,
        ..GridConfig::default()
    };
    AppModel::new(store, config, data_file)
}

/// Run the commands `update` returns the way the runtime does, minus disk I/O
fn apply(model: &mut AppModel, msg: Msg) -> Vec<Cmd> {
    let mut seen = Vec::new();
    let mut queue: Vec<Cmd> = update(model, msg).into_iter().collect();
    while let Some(cmd) = queue.pop() {
        match cmd {
            Cmd::Batch(cmds) => queue.extend(cmds.into_iter().rev()),
            Cmd::ReloadRecords => {
                seen.push(Cmd::ReloadRecords);
                queue.extend(update(model, Msg::App(AppMsg::StoreChanged)));
            }
            other => seen.push(other),
        }
    }
    seen
}

#[test]
fn test_click_only_redraws() {
    let mut model = model(false, None);
    let cmds = apply(&mut model, Msg::click(0, "amount"));
    assert_eq!(cmds, vec![Cmd::Redraw]);
    assert_eq!(model.store.revision(), 0);
}

#[test]
fn test_blur_commits_and_reloads() {
    let mut model = model(false, None);
    apply(&mut model, Msg::click(0, "amount"));
    apply(&mut model, Msg::input("950"));
    let cmds = apply(&mut model, Msg::blur());

    assert!(cmds.contains(&Cmd::ReloadRecords));
    assert_eq!(model.seen_revision, 1);
    assert_eq!(
        model.grid.records()[0].get("amount"),
        FieldValue::from("950")
    );
    assert!(model.grid.editing_cells().is_empty());
}

#[test]
fn test_autosave_after_store_change() {
    let path = PathBuf::from("/tmp/ledger-grid-test.json");
    let mut model = model(true, Some(path.clone()));
    apply(&mut model, Msg::click(1, "description"));
    let cmds = apply(&mut model, Msg::blur());
    assert!(cmds.contains(&Cmd::SaveRecords { path }));
}

#[test]
fn test_no_autosave_without_data_file() {
    let mut model = model(true, None);
    apply(&mut model, Msg::click(1, "description"));
    let cmds = apply(&mut model, Msg::blur());
    assert!(!cmds
        .iter()
        .any(|c| matches!(c, Cmd::SaveRecords { .. })));
}

#[test]
fn test_clicking_elsewhere_commits_open_session() {
    let mut model = model(false, None);
    apply(&mut model, Msg::click(0, "description"));
    apply(&mut model, Msg::input("Mortgage"));
    apply(&mut model, Msg::click(1, "amount"));

    assert_eq!(
        model.store.get(&RecordId::new("1")).unwrap().get("description"),
        FieldValue::from("Mortgage")
    );
    let editing = model.grid.editing_cells();
    assert_eq!(editing.len(), 1);
    assert_eq!(editing[0].0, 1);
    assert_eq!(editing[0].1.as_str(), "amount");
}

#[test]
fn test_input_without_session_is_ignored() {
    let mut model = model(false, None);
    assert!(update(&mut model, Msg::input("lost")).is_none());
    assert!(update(&mut model, Msg::blur()).is_none());
    assert_eq!(model.store.revision(), 0);
}

#[test]
fn test_read_only_click_sets_status() {
    let mut model = model(false, None);
    apply(&mut model, Msg::click(0, "date"));
    assert_eq!(model.status.as_deref(), Some("Column 'date' is read-only"));
    assert!(model.grid.editing_cells().is_empty());
}

#[test]
fn test_delete_row_removes_record_and_reloads() {
    let mut model = model(false, None);
    let cmds = apply(&mut model, Msg::Grid(GridMsg::DeleteRow(1)));

    assert!(cmds.contains(&Cmd::ReloadRecords));
    assert!(model.store.get(&RecordId::new("42")).is_none());
    assert_eq!(model.grid.row_count(), 1);
    assert_eq!(model.status.as_deref(), Some("Delete 42"));
}

#[test]
fn test_add_record_appears_in_grid() {
    let mut model = model(false, None);
    let mut fields = BTreeMap::new();
    fields.insert("description".to_string(), FieldValue::from("Lunch"));
    apply(&mut model, Msg::App(AppMsg::AddRecord(fields)));

    assert_eq!(model.grid.row_count(), 3);
    assert_eq!(
        model.grid.cell_text(2, "description").as_deref(),
        Some("Lunch")
    );
}

#[test]
fn test_save_results_update_status() {
    let mut model = model(false, None);
    apply(&mut model, Msg::App(AppMsg::Save));
    assert_eq!(
        model.status.as_deref(),
        Some("Saving is disabled for this session")
    );

    apply(&mut model, Msg::App(AppMsg::SaveCompleted(Err("disk full".into()))));
    assert_eq!(model.status.as_deref(), Some("Save failed: disk full"));

    apply(&mut model, Msg::App(AppMsg::SaveCompleted(Ok(()))));
    assert_eq!(model.status.as_deref(), Some("Saved"));
}

#[test]
fn test_quit() {
    let mut model = model(false, None);
    assert_eq!(update(&mut model, Msg::App(AppMsg::Quit)), Some(Cmd::Quit));
}
