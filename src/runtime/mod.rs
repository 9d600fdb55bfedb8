//! Runtime module - terminal session integration
//!
//! - `app` - the read/update/draw loop
//! - `input` - prompt line to message mapping

pub mod app;
pub mod input;

pub use app::App;
