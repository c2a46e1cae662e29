//! Engine module - drives a quiz session in real time.
//!
//! The core [`Session`](tui_mathrush_core::Session) is a pure reducer; this
//! crate turns wall-clock time and queued player intents into the ordered
//! stream of events it consumes, and hands back finished session results for
//! persistence.
//!
//! # Example
//!
//! ```
//! use tui_mathrush_core::Session;
//! use tui_mathrush_engine::GameDriver;
//! use tui_mathrush_types::{GameMode, Screen, SessionEvent};
//!
//! let mut driver = GameDriver::new(Session::new(7).with_duration_ms(30_000));
//! driver.push(SessionEvent::Start(GameMode::GridHunt));
//! driver.drain();
//!
//! let finished = driver.advance_by(30_000);
//! assert_eq!(finished.len(), 1);
//! assert_eq!(driver.session().screen(), Screen::Results);
//! ```

pub mod driver;

pub use tui_mathrush_core as core;
pub use tui_mathrush_types as types;

pub use driver::GameDriver;
