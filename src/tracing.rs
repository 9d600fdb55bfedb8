//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging cell
//! edit sessions and store writes.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cell=debug,message=debug` - scoped filtering
//! - `RUST_LOG=ledger_grid::grid=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/ledger-grid/logs/ledger-grid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::Grid;

/// Base name of the rotated log files
pub const LOG_FILE_NAME: &str = "ledger-grid.log";

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes
/// to the logs directory with daily rotation at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG; stderr keeps the table output clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of open edit sessions for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct EditSessionSnapshot {
    pub row_count: usize,
    /// (row, column, pending input) for each editing cell
    pub sessions: Vec<(usize, String, String)>,
}

impl EditSessionSnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            row_count: grid.row_count(),
            sessions: grid
                .editing_cells()
                .into_iter()
                .map(|(row, column)| {
                    let pending = grid.cell_text(row, column.as_str()).unwrap_or_default();
                    (row, column.to_string(), pending)
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &EditSessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.row_count != other.row_count {
            changes.push(format!("rows: {} → {}", self.row_count, other.row_count));
        }

        for (row, column, pending) in &other.sessions {
            match self
                .sessions
                .iter()
                .find(|(r, c, _)| r == row && c == column)
            {
                None => changes.push(format!("({},{}) editing", row, column)),
                Some((_, _, before)) if before != pending => {
                    changes.push(format!("({},{}) {:?} → {:?}", row, column, before, pending))
                }
                Some(_) => {}
            }
        }

        for (row, column, _) in &self.sessions {
            let still_open = other
                .sessions
                .iter()
                .any(|(r, c, _)| r == row && c == column);
            if !still_open {
                changes.push(format!("({},{}) closed", row, column));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
