//! Terminal "quiz renderer" module.
//!
//! A small rendering layer for terminal gameplay. It avoids widget/layout
//! libraries and renders into a simple framebuffer that is diffed and flushed
//! to the terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render every screen from a copyable snapshot, with no session access
//! - Only repaint what changed between frames

pub mod fb;
pub mod quiz_view;
pub mod renderer;

pub use tui_mathrush_core as core;
pub use tui_mathrush_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use quiz_view::{AnchorY, QuizView, ScoreboardView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
