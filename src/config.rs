//! Grid configuration persistence
//!
//! Stores user preferences in `~/.config/ledger-grid/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Records file; defaults to `records.json` in the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Widest a column may render, in characters
    #[serde(default = "default_max_column_width")]
    pub max_column_width: usize,

    /// Narrowest a column may render, in characters
    #[serde(default = "default_min_column_width")]
    pub min_column_width: usize,

    /// Write records to disk after every store change
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_max_column_width() -> usize {
    24
}

fn default_min_column_width() -> usize {
    4
}

fn default_autosave() -> bool {
    true
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            max_column_width: default_max_column_width(),
            min_column_width: default_min_column_width(),
            autosave: default_autosave(),
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Records file to use: configured path, else the default location
    pub fn resolved_data_file(&self) -> Option<PathBuf> {
        self.data_file
            .clone()
            .or_else(crate::config_paths::default_data_file)
    }
}
