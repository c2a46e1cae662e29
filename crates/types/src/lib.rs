//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond parsing and formatting,
//! making them usable in any context (core logic, terminal rendering, score
//! persistence).
//!
//! # Session Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Main loop poll interval (~60 FPS) |
//! | `MAX_TICK_MS` | 250 | Largest single `Tick` the driver emits |
//! | `MIN_DURATION_MS` | 30000 | Shortest session |
//! | `MAX_DURATION_MS` | 180000 | Longest session |
//! | `DURATION_STEP_MS` | 10000 | Duration granularity |
//! | `DEFAULT_DURATION_MS` | 60000 | Duration when nothing is configured |
//!
//! # Per-question Time by Level (Classic)
//!
//! | Level | Time |
//! |-------|------|
//! | 1 | 3500ms |
//! | 2 | 3300ms |
//! | 5 | 2700ms |
//! | 9 | 1900ms |
//! | 13+ | 1200ms (floor) |
//!
//! # Examples
//!
//! ```
//! use tui_mathrush_types::{clamp_duration_ms, GameMode, Screen};
//!
//! let mode = GameMode::from_str("grid").unwrap();
//! assert_eq!(mode, GameMode::GridHunt);
//! assert_eq!(mode.as_str(), "grid_hunt");
//!
//! assert_eq!(Screen::default(), Screen::Menu);
//!
//! // Out-of-range durations are clamped, not rejected.
//! assert_eq!(clamp_duration_ms(5_000), 30_000);
//! assert_eq!(clamp_duration_ms(64_000), 60_000);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Main loop poll interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Largest elapsed interval carried by a single `Tick` event
pub const MAX_TICK_MS: u32 = 250;

/// Shortest configurable session (30s)
pub const MIN_DURATION_MS: u32 = 30_000;

/// Longest configurable session (180s)
pub const MAX_DURATION_MS: u32 = 180_000;

/// Session duration granularity (10s)
pub const DURATION_STEP_MS: u32 = 10_000;

/// Session duration used when nothing is configured (60s)
pub const DEFAULT_DURATION_MS: u32 = 60_000;

/// Time allowed for a Classic question at level 1
pub const BASE_QUESTION_MS: u32 = 3_500;

/// Per-level reduction of the Classic question time
pub const QUESTION_MS_STEP: u32 = 200;

/// Classic question time never drops below this
pub const QUESTION_MS_FLOOR: u32 = 1_200;

/// Correct answers needed per Classic level
pub const CORRECT_PER_LEVEL: u32 = 5;

/// Number of choices shown for a Classic question
pub const OPTION_COUNT: usize = 4;

/// Number of cells in a Grid Hunt grid (multiples 1..=12)
pub const GRID_SIZE: usize = 12;

/// Grid Hunt base range
pub const GRID_BASE_MIN: i32 = 2;
pub const GRID_BASE_MAX: i32 = 12;

/// Grid Hunt factor range
pub const GRID_FACTOR_MIN: i32 = 1;
pub const GRID_FACTOR_MAX: i32 = 12;

/// Every generated option value lies in `[-VALUE_LIMIT, VALUE_LIMIT]`
pub const VALUE_LIMIT: i32 = 999;

/// Number of wide random candidates added to the distractor pool
pub const WIDE_DISTRACTORS: usize = 6;

/// Rejection-sampling budget before distractors are synthesized
pub const DISTRACTOR_ATTEMPTS: u32 = 64;

/// Leaderboard size per (user, mode)
pub const TOP_SCORES_LIMIT: usize = 10;

/// Clamp a session duration into the valid range and snap it to the nearest step.
///
/// # Examples
///
/// ```
/// use tui_mathrush_types::clamp_duration_ms;
///
/// assert_eq!(clamp_duration_ms(0), 30_000);
/// assert_eq!(clamp_duration_ms(95_000), 100_000);
/// assert_eq!(clamp_duration_ms(1_000_000), 180_000);
/// ```
pub fn clamp_duration_ms(ms: u32) -> u32 {
    let clamped = ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS);
    let snapped = (clamped + DURATION_STEP_MS / 2) / DURATION_STEP_MS * DURATION_STEP_MS;
    snapped.clamp(MIN_DURATION_MS, MAX_DURATION_MS)
}


/// The two play modes
///
/// - **Classic**: four-option arithmetic quiz with escalating difficulty and a per-question timer
/// - **GridHunt**: find `base × factor` in a shuffled grid of the base's multiples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Classic,
    GridHunt,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mathrush_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("Classic"), Some(GameMode::Classic));
    /// assert_eq!(GameMode::from_str("grid_hunt"), Some(GameMode::GridHunt));
    /// assert_eq!(GameMode::from_str("chess"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "c" => Some(GameMode::Classic),
            "grid_hunt" | "gridhunt" | "grid" | "g" => Some(GameMode::GridHunt),
            _ => None,
        }
    }

    /// Convert to snake_case string (storage key form)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::GridHunt => "grid_hunt",
        }
    }

    /// Human-readable title
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::GridHunt => "Grid Hunt",
        }
    }
}

/// Which screen the session is on
///
/// The cycle goes: Menu → Playing → Results → Menu (or Results → Playing on play again).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    Results,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Playing => "playing",
            Screen::Results => "results",
        }
    }
}

/// Events applied to a session
///
/// This is the complete set of inputs the session state machine reacts to.
/// Timer ticks and deadline checks come from the driver, everything else from
/// the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Begin a session in the given mode
    Start(GameMode),
    /// Wall-clock time elapsed since the previous tick
    Tick(u32),
    /// The Classic question with this round id ran out of time
    QuestionTimeout { round_id: u32 },
    /// The player picked this value
    Answer(i32),
    /// Freeze or resume both timers
    TogglePause,
    /// Leave the current session and return to the menu
    Restart,
    /// Start another session in the same mode straight from Results
    PlayAgain,
    /// Configure the session length (Menu/Results only)
    SetDuration(u32),
}

impl SessionEvent {
    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEvent::Start(_) => "start",
            SessionEvent::Tick(_) => "tick",
            SessionEvent::QuestionTimeout { .. } => "questionTimeout",
            SessionEvent::Answer(_) => "answer",
            SessionEvent::TogglePause => "togglePause",
            SessionEvent::Restart => "restart",
            SessionEvent::PlayAgain => "playAgain",
            SessionEvent::SetDuration(_) => "setDuration",
        }
    }
}

/// Cursor movement direction for the Grid Hunt grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player intents produced by the keyboard map
///
/// Intents are screen-agnostic; the input handler resolves them against the
/// current snapshot into [`SessionEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    /// Pick a slot by 0-based index (Classic option or Grid cell)
    Choose(usize),
    /// Move the grid cursor
    Move(Direction),
    /// Confirm the highlighted cell / play again on Results
    Confirm,
    /// Start a specific mode from the menu
    StartMode(GameMode),
    TogglePause,
    /// Back to the menu
    Menu,
    DurationUp,
    DurationDown,
}

/// Statistics of one finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub mode: GameMode,
    /// Final correct count
    pub score: u32,
    pub missed: u32,
    /// Percentage 0-100
    pub accuracy: u8,
    pub level: u32,
    pub best_streak: u32,
}

/// A stored leaderboard row
///
/// Entries are created once by a score store and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub mode: GameMode,
    pub score: u32,
    pub accuracy: u8,
    pub level: u32,
    pub created_at: DateTime<Utc>,
}

/// The signed-in player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
}
