//! TUI Math Rush (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can use `tui_mathrush::{core,adapter,term,input,engine,types}`.

pub use tui_mathrush_adapter as adapter;
pub use tui_mathrush_core as core;
pub use tui_mathrush_engine as engine;
pub use tui_mathrush_input as input;
pub use tui_mathrush_term as term;
pub use tui_mathrush_types as types;
