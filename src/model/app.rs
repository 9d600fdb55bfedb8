//! Application model
//!
//! Holds the grid, the record store it writes to, and session settings.

use std::path::PathBuf;
use std::rc::Rc;

use crate::config::GridConfig;
use crate::grid::{Grid, RenderOptions};
use crate::store::MemoryStore;

use super::column::financial_record_columns;

pub struct AppModel {
    pub grid: Grid,
    pub store: Rc<MemoryStore>,
    pub config: GridConfig,
    /// Where records are persisted; `None` disables saving
    pub data_file: Option<PathBuf>,
    /// Store revision the grid last received
    pub seen_revision: u64,
    /// Last status line (save results, warnings)
    pub status: Option<String>,
}

impl AppModel {
    /// Model over the financial record columns
    pub fn new(store: MemoryStore, config: GridConfig, data_file: Option<PathBuf>) -> Self {
        let store = Rc::new(store);
        let grid = Grid::new(financial_record_columns(), store.records(), store.clone());
        Self {
            grid,
            seen_revision: store.revision(),
            store,
            config,
            data_file,
            status: None,
        }
    }

    /// Whether the store has writes the grid has not seen yet
    pub fn store_is_ahead(&self) -> bool {
        self.store.revision() != self.seen_revision
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            min_column_width: self.config.min_column_width,
            max_column_width: self.config.max_column_width,
        }
    }
}
