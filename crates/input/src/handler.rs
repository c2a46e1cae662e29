//! Resolves player intents into session events.
//!
//! The handler owns the only piece of UI state the session does not: the
//! highlighted slot. Classic options are laid out 2x2, Grid Hunt cells 4x3.

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::core::{RoundSnapshot, SessionSnapshot};
use crate::map::handle_key_event;
use crate::types::{
    clamp_duration_ms, Direction, InputIntent, Screen, SessionEvent, DURATION_STEP_MS,
};

/// Columns of the Classic option layout.
pub const CLASSIC_COLUMNS: usize = 2;

/// Columns of the Grid Hunt cell layout.
pub const GRID_COLUMNS: usize = 4;

/// Tracks the cursor and turns intents into [`SessionEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    cursor: usize,
    /// Round the cursor was last placed in
    round_id: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighted slot index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Map a key for the current screen and resolve it.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        snapshot: &SessionSnapshot,
    ) -> ArrayVec<SessionEvent, 2> {
        match handle_key_event(snapshot.screen, key) {
            Some(intent) => self.resolve(intent, snapshot),
            None => ArrayVec::new(),
        }
    }

    /// Resolve one intent against the latest snapshot.
    ///
    /// Returns no events when the intent has no meaning on the current
    /// screen, so callers can forward the result unconditionally.
    pub fn resolve(
        &mut self,
        intent: InputIntent,
        snapshot: &SessionSnapshot,
    ) -> ArrayVec<SessionEvent, 2> {
        let mut events = ArrayVec::new();
        self.sync(snapshot);

        match (snapshot.screen, intent) {
            (Screen::Menu, InputIntent::StartMode(mode)) => {
                self.cursor = 0;
                events.push(SessionEvent::Start(mode));
            }
            (Screen::Menu | Screen::Results, InputIntent::DurationUp) => {
                let ms = snapshot.total_duration_ms.saturating_add(DURATION_STEP_MS);
                push_duration(&mut events, snapshot, ms);
            }
            (Screen::Menu | Screen::Results, InputIntent::DurationDown) => {
                let ms = snapshot.total_duration_ms.saturating_sub(DURATION_STEP_MS);
                push_duration(&mut events, snapshot, ms);
            }

            (Screen::Playing, InputIntent::TogglePause) => events.push(SessionEvent::TogglePause),
            (Screen::Playing, InputIntent::Menu) => events.push(SessionEvent::Restart),
            (Screen::Playing, _) if !snapshot.playable() => {}
            (Screen::Playing, InputIntent::Choose(index)) => {
                if let Some(value) = snapshot.slot_value(index) {
                    self.cursor = index;
                    events.push(SessionEvent::Answer(value));
                }
            }
            (Screen::Playing, InputIntent::Move(direction)) => self.move_cursor(direction, snapshot),
            (Screen::Playing, InputIntent::Confirm) => {
                if let Some(value) = snapshot.slot_value(self.cursor) {
                    events.push(SessionEvent::Answer(value));
                }
            }

            (Screen::Results, InputIntent::Confirm) => {
                self.cursor = 0;
                events.push(SessionEvent::PlayAgain);
            }
            (Screen::Results, InputIntent::Menu) => events.push(SessionEvent::Restart),

            _ => {}
        }

        events
    }

    /// Keep the cursor inside the current round's slots.
    fn sync(&mut self, snapshot: &SessionSnapshot) {
        if snapshot.round_id != self.round_id {
            self.round_id = snapshot.round_id;
            let count = snapshot.slot_count();
            if count == 0 {
                self.cursor = 0;
            } else if self.cursor >= count {
                self.cursor = count - 1;
            }
        }
    }

    fn move_cursor(&mut self, direction: Direction, snapshot: &SessionSnapshot) {
        let count = snapshot.slot_count();
        if count == 0 {
            return;
        }
        let columns = match snapshot.round {
            RoundSnapshot::Classic { .. } => CLASSIC_COLUMNS,
            RoundSnapshot::Grid { .. } => GRID_COLUMNS,
            RoundSnapshot::None => return,
        };

        let row = self.cursor / columns;
        let col = self.cursor % columns;
        let rows = count.div_ceil(columns);

        let (row, col) = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(rows - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(columns - 1)),
        };
        self.cursor = (row * columns + col).min(count - 1);
    }
}

fn push_duration(events: &mut ArrayVec<SessionEvent, 2>, snapshot: &SessionSnapshot, ms: u32) {
    let ms = clamp_duration_ms(ms);
    if ms != snapshot.total_duration_ms {
        events.push(SessionEvent::SetDuration(ms));
    }
}
