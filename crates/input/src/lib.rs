//! Terminal input module (engine-facing).
//!
//! Keys are first mapped into screen-aware [`crate::types::InputIntent`]s,
//! then the [`InputHandler`] resolves intents against the latest
//! [`tui_mathrush_core::SessionSnapshot`] into session events. Neither step
//! touches the session directly.

pub mod handler;
pub mod map;

pub use tui_mathrush_core as core;
pub use tui_mathrush_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
