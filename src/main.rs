use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use ledger_grid::cli::{CliArgs, StartupConfig, StartupSource};
use ledger_grid::config::GridConfig;
use ledger_grid::model::AppModel;
use ledger_grid::store::MemoryStore;

mod runtime;

use runtime::App;

/// Imported CSV is saved next to the source as `<stem>.json`
fn csv_save_path(csv: &Path) -> PathBuf {
    csv.with_extension("json")
}

/// Open the store named by the startup config and decide where to save
fn open_store(
    startup: &StartupConfig,
    config: &GridConfig,
) -> Result<(MemoryStore, Option<PathBuf>)> {
    let (store, path) = match &startup.source {
        StartupSource::DefaultFile => {
            let path = config
                .resolved_data_file()
                .context("No config directory available for the records file")?;
            let store = MemoryStore::load_json(&path)
                .with_context(|| format!("Failed to load records from {}", path.display()))?;
            (store, path)
        }
        StartupSource::File(path) => {
            let store = MemoryStore::load_json(path)
                .with_context(|| format!("Failed to load records from {}", path.display()))?;
            (store, path.clone())
        }
        StartupSource::Csv(csv) => {
            let store = MemoryStore::import_csv(csv)
                .with_context(|| format!("Failed to import {}", csv.display()))?;
            (store, csv_save_path(csv))
        }
    };

    let data_file = startup.save.then_some(path);
    Ok((store, data_file))
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let startup = args.into_config().map_err(anyhow::Error::msg)?;

    ledger_grid::tracing::init();

    let mut config = GridConfig::load();
    if let Some(width) = startup.max_column_width {
        config.max_column_width = width;
    }

    let (store, data_file) = open_store(&startup, &config)?;
    tracing::info!(
        records = store.len(),
        data_file = ?data_file,
        "starting session"
    );

    let model = AppModel::new(store, config, data_file);
    let stdout = io::stdout();
    let mut app = App::new(model, stdout.lock());
    app.run(io::stdin().lock())?;

    if !app.should_quit() {
        tracing::debug!("input closed, exiting");
    }
    Ok(())
}
