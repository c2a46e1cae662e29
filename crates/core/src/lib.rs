//! Core quiz logic - pure, deterministic, and testable
//!
//! This crate contains the quiz rules, round generation and the session
//! state machine. It has **zero dependencies** on terminals, files or
//! networking, making it:
//!
//! - **Deterministic**: Same seed produces identical questions and grids
//! - **Testable**: The whole session lifecycle runs without a renderer
//! - **Portable**: Can be driven by any front end (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`question`]: Classic prompts, answers and distractor selection
//! - [`grid`]: Grid Hunt times-table rounds
//! - [`scoring`]: Accuracy, streak, leveling and per-question pacing
//! - [`session`]: Session state machine driven by [`types::SessionEvent`]
//! - [`snapshot`]: Copyable render-ready view of a session
//! - [`rng`]: Seedable random source shared by the generators
//!
//! # Game Rules
//!
//! - **Classic**: four options, one correct; a question times out after
//!   `3500ms - 200ms per level` (1200ms floor); level rises every 5 correct answers
//! - **Grid Hunt**: find `base × factor` among the 12 multiples of `base`; no per-round timer
//! - **Session**: fixed length (30-180s); when the countdown hits zero the result is final
//!
//! # Example
//!
//! ```
//! use tui_mathrush_core::{Round, Session};
//! use tui_mathrush_types::{GameMode, Screen, SessionEvent};
//!
//! let mut session = Session::new(12345).with_duration_ms(30_000);
//! session.apply(SessionEvent::Start(GameMode::Classic));
//!
//! // Answer the first question correctly.
//! let answer = session.round().map(Round::expected).unwrap();
//! session.apply(SessionEvent::Answer(answer));
//! assert_eq!(session.correct(), 1);
//!
//! // Run the clock out.
//! session.apply(SessionEvent::Tick(30_000));
//! assert_eq!(session.screen(), Screen::Results);
//! assert_eq!(session.take_finished().unwrap().score, 1);
//! ```

pub mod grid;
pub mod question;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_mathrush_types as types;

// Re-export commonly used types for convenience
pub use grid::{generate_grid_round, GridRound};
pub use question::{generate_question, ClassicRound, Operation, Prompt};
pub use rng::QuizRng;
pub use scoring::{accuracy, level_for_correct, next_level, per_question_time_ms};
pub use session::{Feedback, Round, Session};
pub use snapshot::{RoundSnapshot, SessionSnapshot};
