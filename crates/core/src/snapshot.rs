use crate::question::Prompt;
use crate::session::Feedback;
use crate::types::{GameMode, Screen, DEFAULT_DURATION_MS, GRID_SIZE, OPTION_COUNT};

/// Render-facing view of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundSnapshot {
    None,
    Classic {
        prompt: Prompt,
        options: [i32; OPTION_COUNT],
        time_left_ms: u32,
        time_total_ms: u32,
    },
    Grid {
        base: i32,
        factor: i32,
        grid: [i32; GRID_SIZE],
    },
}

/// Copyable snapshot of a session for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub mode: GameMode,
    pub paused: bool,
    pub total_duration_ms: u32,
    pub remaining_ms: u32,
    pub level: u32,
    pub correct: u32,
    pub missed: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub accuracy: u8,
    pub round: RoundSnapshot,
    pub round_id: u32,
    pub episode_id: u32,
    pub seed: u64,
    pub last_feedback: Option<Feedback>,
}

impl SessionSnapshot {
    /// True when answers are currently accepted
    pub fn playable(&self) -> bool {
        self.screen == Screen::Playing && !self.paused
    }

    /// Value shown in display slot `index`, if the round has one
    pub fn slot_value(&self, index: usize) -> Option<i32> {
        match self.round {
            RoundSnapshot::Classic { options, .. } => options.get(index).copied(),
            RoundSnapshot::Grid { grid, .. } => grid.get(index).copied(),
            RoundSnapshot::None => None,
        }
    }

    /// Number of selectable slots in the current round
    pub fn slot_count(&self) -> usize {
        match self.round {
            RoundSnapshot::Classic { .. } => OPTION_COUNT,
            RoundSnapshot::Grid { .. } => GRID_SIZE,
            RoundSnapshot::None => 0,
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            screen: Screen::Menu,
            mode: GameMode::Classic,
            paused: false,
            total_duration_ms: DEFAULT_DURATION_MS,
            remaining_ms: DEFAULT_DURATION_MS,
            level: 1,
            correct: 0,
            missed: 0,
            streak: 0,
            best_streak: 0,
            accuracy: 0,
            round: RoundSnapshot::None,
            round_id: 0,
            episode_id: 0,
            seed: 0,
            last_feedback: None,
        }
    }
}
