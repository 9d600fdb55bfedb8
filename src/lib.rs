//! Ledger Grid - editable record grid
//!
//! This crate provides the core types and logic for a table of records
//! edited in place, one cell at a time, with edits flowing back to a
//! record store. State changes follow the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod messages;
pub mod model;
pub mod store;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::Grid;
pub use messages::Msg;
pub use model::AppModel;
pub use store::{MemoryStore, RecordStore};
