//! Command-line argument parsing
//!
//! Supports:
//! - Opening a JSON records file (or the default one)
//! - Importing records from CSV
//! - Read-only sessions that never write to disk
//! - Overriding the maximum column width

use clap::Parser;
use std::path::PathBuf;

/// Editable record grid
#[derive(Parser, Debug)]
#[command(name = "ledger-grid", version, about = "Edit financial records in place")]
pub struct CliArgs {
    /// JSON records file to open
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Import records from a CSV file with a header row
    #[arg(long, value_name = "PATH")]
    pub import_csv: Option<PathBuf>,

    /// Never write records to disk
    #[arg(long)]
    pub no_save: bool,

    /// Maximum column width in characters
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,
}

/// Where the initial records come from
#[derive(Debug, Clone, PartialEq)]
pub enum StartupSource {
    /// Configured or default records file
    DefaultFile,
    /// JSON records file given on the command line
    File(PathBuf),
    /// CSV import
    Csv(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub source: StartupSource,
    /// Persist changes to disk
    pub save: bool,
    pub max_column_width: Option<usize>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let source = match (self.file, self.import_csv) {
            (Some(_), Some(_)) => {
                return Err("Cannot open a records file and import CSV at once".to_string())
            }
            (Some(file), None) => StartupSource::File(file),
            (None, Some(csv)) => StartupSource::Csv(csv),
            (None, None) => StartupSource::DefaultFile,
        };

        if self.width == Some(0) {
            return Err("Column width must be at least 1".to_string());
        }

        Ok(StartupConfig {
            source,
            save: !self.no_save,
            max_column_width: self.width,
        })
    }
}
