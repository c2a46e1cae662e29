//! Session module - the quiz state machine
//!
//! A [`Session`] owns everything about one play-through: screen, mode,
//! timers, counters and the current round. It changes only through
//! [`Session::apply`], which takes one [`SessionEvent`] at a time, so the
//! whole lifecycle can be driven and tested without a terminal.
//!
//! # Lifecycle
//!
//! ```text
//! Menu --Start(mode)--> Playing --remaining hits 0--> Results
//!  ^                                                   |  |
//!  +------------------------Restart--------------------+  |
//!                          Playing <------PlayAgain-------+
//! ```
//!
//! # Time
//!
//! Time only moves through `Tick` events. Each tick advances both the session
//! countdown and a play clock on which Classic deadlines are expressed, so
//! pausing (which drops ticks) freezes both timers together.

use crate::grid::{generate_grid_round, GridRound};
use crate::question::{generate_question, ClassicRound};
use crate::rng::QuizRng;
use crate::scoring::{accuracy, next_level, next_streak, per_question_time_ms};
use crate::snapshot::{RoundSnapshot, SessionSnapshot};
use crate::types::{
    clamp_duration_ms, GameMode, Screen, SessionEvent, SessionResult, DEFAULT_DURATION_MS,
};

/// The round currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Classic(ClassicRound),
    Grid(GridRound),
}

impl Round {
    pub fn is_correct(&self, choice: i32) -> bool {
        match self {
            Round::Classic(q) => q.is_correct(choice),
            Round::Grid(g) => g.is_correct(choice),
        }
    }

    /// The value that would have been correct
    pub fn expected(&self) -> i32 {
        match self {
            Round::Classic(q) => q.answer,
            Round::Grid(g) => g.product,
        }
    }
}

/// What happened to the previous round (for player feedback)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Correct,
    Wrong { expected: i32 },
    TimedOut { expected: i32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    rng: QuizRng,
    screen: Screen,
    mode: GameMode,
    total_duration_ms: u32,
    remaining_ms: u32,
    paused: bool,
    level: u32,
    correct: u32,
    missed: u32,
    streak: u32,
    best_streak: u32,
    /// Play clock: advances only while playing and unpaused.
    clock_ms: u64,
    round: Option<Round>,
    /// Monotonic id of the current round; stale timeouts carry an old id.
    round_id: u32,
    /// Classic deadline on the play clock.
    deadline_ms: u64,
    /// Monotonic id incremented on every start.
    episode_id: u32,
    last_feedback: Option<Feedback>,
    /// Result of the session that just ended (consumed by the driver).
    finished: Option<SessionResult>,
}

impl Session {
    /// Create a session on the menu with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: QuizRng::new(seed),
            screen: Screen::Menu,
            mode: GameMode::Classic,
            total_duration_ms: DEFAULT_DURATION_MS,
            remaining_ms: DEFAULT_DURATION_MS,
            paused: false,
            level: 1,
            correct: 0,
            missed: 0,
            streak: 0,
            best_streak: 0,
            clock_ms: 0,
            round: None,
            round_id: 0,
            deadline_ms: 0,
            episode_id: 0,
            last_feedback: None,
            finished: None,
        }
    }

    /// Builder-style duration setting (clamped to the valid range)
    pub fn with_duration_ms(mut self, ms: u32) -> Self {
        self.total_duration_ms = clamp_duration_ms(ms);
        self.remaining_ms = self.total_duration_ms;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn total_duration_ms(&self) -> u32 {
        self.total_duration_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Accuracy derived from the counters
    pub fn accuracy(&self) -> u8 {
        accuracy(self.correct, self.missed)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        self.last_feedback
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    /// Time left on the current Classic question (None outside Classic play)
    pub fn question_time_left_ms(&self) -> Option<u32> {
        match self.round {
            Some(Round::Classic(_)) if self.is_playing() => {
                Some(self.deadline_ms.saturating_sub(self.clock_ms) as u32)
            }
            _ => None,
        }
    }

    /// The timeout event to enqueue if the current Classic deadline has passed
    pub fn timeout_due(&self) -> Option<SessionEvent> {
        if !self.is_playing() || self.paused {
            return None;
        }
        match self.round {
            Some(Round::Classic(_)) if self.clock_ms >= self.deadline_ms => {
                Some(SessionEvent::QuestionTimeout {
                    round_id: self.round_id,
                })
            }
            _ => None,
        }
    }

    /// Take the result of the session that just ended.
    ///
    /// Set exactly once per finished session.
    pub fn take_finished(&mut self) -> Option<SessionResult> {
        self.finished.take()
    }

    /// Statistics of the current (or just finished) session
    pub fn result(&self) -> SessionResult {
        SessionResult {
            mode: self.mode,
            score: self.correct,
            missed: self.missed,
            accuracy: self.accuracy(),
            level: self.level,
            best_streak: self.best_streak,
        }
    }

    /// Apply one event. Returns true if the session changed.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Start(mode) => {
                if self.is_playing() {
                    return false;
                }
                self.begin(mode);
                true
            }
            SessionEvent::Tick(elapsed_ms) => self.tick(elapsed_ms),
            SessionEvent::QuestionTimeout { round_id } => self.question_timeout(round_id),
            SessionEvent::Answer(choice) => self.answer(choice),
            SessionEvent::TogglePause => {
                if !self.is_playing() {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            SessionEvent::Restart => {
                if self.screen == Screen::Menu {
                    return false;
                }
                self.to_menu();
                true
            }
            SessionEvent::PlayAgain => {
                if self.screen != Screen::Results {
                    return false;
                }
                self.begin(self.mode);
                true
            }
            SessionEvent::SetDuration(ms) => {
                if self.is_playing() {
                    return false;
                }
                self.total_duration_ms = clamp_duration_ms(ms);
                self.remaining_ms = self.total_duration_ms;
                true
            }
        }
    }

    fn begin(&mut self, mode: GameMode) {
        self.screen = Screen::Playing;
        self.mode = mode;
        self.level = 1;
        self.correct = 0;
        self.missed = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.remaining_ms = self.total_duration_ms;
        self.paused = false;
        self.clock_ms = 0;
        self.last_feedback = None;
        self.finished = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.next_round();
    }

    fn to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.paused = false;
        self.round = None;
        // Invalidate any timeout still in flight for the old round.
        self.round_id = self.round_id.wrapping_add(1);
        self.remaining_ms = self.total_duration_ms;
        self.last_feedback = None;
    }

    fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_playing() || self.paused {
            return false;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.clock_ms += elapsed_ms as u64;

        if self.remaining_ms == 0 {
            self.finish();
        }
        true
    }

    fn finish(&mut self) {
        self.screen = Screen::Results;
        self.paused = false;
        self.round = None;
        self.round_id = self.round_id.wrapping_add(1);
        self.finished = Some(self.result());
    }

    fn question_timeout(&mut self, round_id: u32) -> bool {
        if !self.is_playing() || self.paused || round_id != self.round_id {
            return false;
        }
        let Some(Round::Classic(q)) = self.round else {
            return false;
        };
        if self.clock_ms < self.deadline_ms {
            return false;
        }

        self.record_miss();
        self.last_feedback = Some(Feedback::TimedOut { expected: q.answer });
        self.next_round();
        true
    }

    fn answer(&mut self, choice: i32) -> bool {
        if !self.is_playing() || self.paused {
            return false;
        }
        let Some(round) = self.round else {
            return false;
        };

        if round.is_correct(choice) {
            self.correct = self.correct.saturating_add(1);
            self.streak = next_streak(self.streak, true);
            self.best_streak = self.best_streak.max(self.streak);
            if self.mode == GameMode::Classic {
                self.level = next_level(self.level, self.correct);
            }
            self.last_feedback = Some(Feedback::Correct);
        } else {
            self.record_miss();
            self.last_feedback = Some(Feedback::Wrong {
                expected: round.expected(),
            });
        }

        self.next_round();
        true
    }

    fn record_miss(&mut self) {
        self.missed = self.missed.saturating_add(1);
        self.streak = next_streak(self.streak, false);
    }

    fn next_round(&mut self) {
        self.round_id = self.round_id.wrapping_add(1);
        self.round = Some(match self.mode {
            GameMode::Classic => {
                self.deadline_ms = self.clock_ms + per_question_time_ms(self.level) as u64;
                Round::Classic(generate_question(self.level, &mut self.rng))
            }
            GameMode::GridHunt => Round::Grid(generate_grid_round(&mut self.rng)),
        });
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.screen = self.screen;
        out.mode = self.mode;
        out.paused = self.paused;
        out.total_duration_ms = self.total_duration_ms;
        out.remaining_ms = self.remaining_ms;
        out.level = self.level;
        out.correct = self.correct;
        out.missed = self.missed;
        out.streak = self.streak;
        out.best_streak = self.best_streak;
        out.accuracy = self.accuracy();
        out.round_id = self.round_id;
        out.episode_id = self.episode_id;
        out.seed = self.rng.seed();
        out.last_feedback = self.last_feedback;
        out.round = match self.round {
            Some(Round::Classic(q)) => RoundSnapshot::Classic {
                prompt: q.prompt,
                options: q.options,
                time_left_ms: self.question_time_left_ms().unwrap_or(0),
                time_total_ms: per_question_time_ms(self.level),
            },
            Some(Round::Grid(g)) => RoundSnapshot::Grid {
                base: g.base,
                factor: g.factor,
                grid: g.grid,
            },
            None => RoundSnapshot::None,
        };
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GRID_SIZE, MAX_DURATION_MS, MIN_DURATION_MS};

    fn classic(session: &Session) -> ClassicRound {
        match session.round() {
            Some(Round::Classic(q)) => *q,
            other => panic!("expected classic round, got {:?}", other),
        }
    }

    fn grid(session: &Session) -> GridRound {
        match session.round() {
            Some(Round::Grid(g)) => *g,
            other => panic!("expected grid round, got {:?}", other),
        }
    }

    fn wrong_option(q: &ClassicRound) -> i32 {
        *q.options.iter().find(|&&v| v != q.answer).unwrap()
    }

    fn answer_correctly(session: &mut Session) {
        let expected = session.round().unwrap().expected();
        assert!(session.apply(SessionEvent::Answer(expected)));
    }

    #[test]
    fn test_new_session_is_on_menu() {
        let s = Session::new(12345);

        assert_eq!(s.screen(), Screen::Menu);
        assert_eq!(s.level(), 1);
        assert_eq!(s.correct(), 0);
        assert_eq!(s.missed(), 0);
        assert_eq!(s.streak(), 0);
        assert!(!s.paused());
        assert!(s.round().is_none());
        assert_eq!(s.remaining_ms(), DEFAULT_DURATION_MS);
        assert_eq!(s.episode_id(), 0);
    }

    #[test]
    fn test_start_resets_and_generates_round() {
        let mut s = Session::new(12345).with_duration_ms(30_000);
        assert!(s.apply(SessionEvent::Start(GameMode::Classic)));

        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.mode(), GameMode::Classic);
        assert_eq!(s.remaining_ms(), 30_000);
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.question_time_left_ms(), Some(3500));
        classic(&s);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut s = Session::new(1);
        s.apply(SessionEvent::Start(GameMode::Classic));
        let round_id = s.round_id();
        assert!(!s.apply(SessionEvent::Start(GameMode::GridHunt)));
        assert_eq!(s.mode(), GameMode::Classic);
        assert_eq!(s.round_id(), round_id);
    }

    #[test]
    fn test_tick_counts_down_and_floors_at_zero() {
        let mut s = Session::new(1).with_duration_ms(30_000);
        s.apply(SessionEvent::Start(GameMode::GridHunt));

        assert!(s.apply(SessionEvent::Tick(1_000)));
        assert_eq!(s.remaining_ms(), 29_000);

        assert!(s.apply(SessionEvent::Tick(100_000)));
        assert_eq!(s.remaining_ms(), 0);
        assert_eq!(s.screen(), Screen::Results);
    }

    #[test]
    fn test_tick_ignored_outside_play() {
        let mut s = Session::new(1);
        assert!(!s.apply(SessionEvent::Tick(1_000)));
        assert_eq!(s.remaining_ms(), DEFAULT_DURATION_MS);
    }

    #[test]
    fn test_finish_emits_result_once() {
        let mut s = Session::new(1).with_duration_ms(30_000);
        s.apply(SessionEvent::Start(GameMode::Classic));
        answer_correctly(&mut s);

        s.apply(SessionEvent::Tick(30_000));
        let result = s.take_finished().expect("result after expiry");
        assert_eq!(result.score, 1);
        assert_eq!(result.mode, GameMode::Classic);
        assert_eq!(result.accuracy, 100);

        // Further ticks do nothing and produce no second result.
        assert!(!s.apply(SessionEvent::Tick(1_000)));
        assert!(s.take_finished().is_none());
    }

    #[test]
    fn test_classic_correct_answer() {
        let mut s = Session::new(7);
        s.apply(SessionEvent::Start(GameMode::Classic));
        let first_id = s.round_id();

        answer_correctly(&mut s);
        assert_eq!(s.correct(), 1);
        assert_eq!(s.streak(), 1);
        assert_eq!(s.last_feedback(), Some(Feedback::Correct));
        assert_ne!(s.round_id(), first_id);
    }

    #[test]
    fn test_classic_wrong_answer_keeps_level() {
        let mut s = Session::new(7);
        s.apply(SessionEvent::Start(GameMode::Classic));
        for _ in 0..5 {
            answer_correctly(&mut s);
        }
        assert_eq!(s.level(), 2);

        let q = classic(&s);
        assert!(s.apply(SessionEvent::Answer(wrong_option(&q))));
        assert_eq!(s.missed(), 1);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.level(), 2);
        assert_eq!(
            s.last_feedback(),
            Some(Feedback::Wrong { expected: q.answer })
        );
    }

    #[test]
    fn test_level_up_on_fifth_correct() {
        let mut s = Session::new(3);
        s.apply(SessionEvent::Start(GameMode::Classic));
        for n in 1..=4 {
            answer_correctly(&mut s);
            assert_eq!(s.level(), 1, "still level 1 after {} correct", n);
        }
        answer_correctly(&mut s);
        assert_eq!(s.level(), 2);
        assert_eq!(s.question_time_left_ms(), Some(3300));
    }

    #[test]
    fn test_best_streak_survives_miss() {
        let mut s = Session::new(3);
        s.apply(SessionEvent::Start(GameMode::GridHunt));
        for _ in 0..3 {
            answer_correctly(&mut s);
        }
        s.apply(SessionEvent::Answer(-1));
        answer_correctly(&mut s);
        assert_eq!(s.streak(), 1);
        assert_eq!(s.best_streak(), 3);
    }

    #[test]
    fn test_grid_answers_always_advance() {
        let mut s = Session::new(21);
        s.apply(SessionEvent::Start(GameMode::GridHunt));
        let id = s.round_id();

        s.apply(SessionEvent::Answer(-5));
        assert_eq!(s.missed(), 1);
        assert_eq!(s.round_id(), id + 1);

        let g = grid(&s);
        s.apply(SessionEvent::Answer(g.product));
        assert_eq!(s.correct(), 1);
        assert_eq!(s.round_id(), id + 2);
        assert_eq!(grid(&s).grid.len(), GRID_SIZE);
    }

    #[test]
    fn test_grid_hunt_keeps_level_one() {
        let mut s = Session::new(21);
        s.apply(SessionEvent::Start(GameMode::GridHunt));
        for _ in 0..12 {
            answer_correctly(&mut s);
        }
        assert_eq!(s.level(), 1);
        assert_eq!(s.question_time_left_ms(), None);
        assert_eq!(s.timeout_due(), None);
    }

    #[test]
    fn test_timeout_counts_miss() {
        let mut s = Session::new(5);
        s.apply(SessionEvent::Start(GameMode::Classic));
        assert_eq!(s.timeout_due(), None);

        s.apply(SessionEvent::Tick(3_500));
        let due = s.timeout_due().expect("deadline passed");
        assert!(s.apply(due));
        assert_eq!(s.missed(), 1);
        assert_eq!(s.streak(), 0);
        assert_eq!(s.question_time_left_ms(), Some(3500));
        assert!(matches!(s.last_feedback(), Some(Feedback::TimedOut { .. })));
    }

    #[test]
    fn test_timeout_before_deadline_ignored() {
        let mut s = Session::new(5);
        s.apply(SessionEvent::Start(GameMode::Classic));
        s.apply(SessionEvent::Tick(3_499));
        let round_id = s.round_id();
        assert!(!s.apply(SessionEvent::QuestionTimeout { round_id }));
        assert_eq!(s.missed(), 0);
    }

    #[test]
    fn test_stale_timeout_ignored() {
        let mut s = Session::new(5);
        s.apply(SessionEvent::Start(GameMode::Classic));
        let stale = s.round_id();
        answer_correctly(&mut s);

        s.apply(SessionEvent::Tick(4_000));
        assert!(!s.apply(SessionEvent::QuestionTimeout { round_id: stale }));
        assert_eq!(s.missed(), 0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut s = Session::new(5).with_duration_ms(60_000);
        s.apply(SessionEvent::Start(GameMode::Classic));
        s.apply(SessionEvent::Tick(1_000));

        assert!(s.apply(SessionEvent::TogglePause));
        assert!(s.paused());
        assert!(!s.apply(SessionEvent::Tick(10_000)));
        assert_eq!(s.remaining_ms(), 59_000);
        assert_eq!(s.question_time_left_ms(), Some(2_500));
        assert_eq!(s.timeout_due(), None);

        let q = classic(&s);
        assert!(!s.apply(SessionEvent::Answer(q.answer)));
        assert_eq!(s.correct(), 0);

        assert!(s.apply(SessionEvent::TogglePause));
        s.apply(SessionEvent::Tick(500));
        assert_eq!(s.remaining_ms(), 58_500);
        assert_eq!(s.question_time_left_ms(), Some(2_000));
    }

    #[test]
    fn test_pause_only_while_playing() {
        let mut s = Session::new(5);
        assert!(!s.apply(SessionEvent::TogglePause));
        assert!(!s.paused());
    }

    #[test]
    fn test_restart_from_results_to_menu() {
        let mut s = Session::new(9).with_duration_ms(30_000);
        s.apply(SessionEvent::Start(GameMode::Classic));
        s.apply(SessionEvent::Tick(30_000));
        assert_eq!(s.screen(), Screen::Results);

        assert!(s.apply(SessionEvent::Restart));
        assert_eq!(s.screen(), Screen::Menu);
        assert!(s.round().is_none());
        assert!(!s.apply(SessionEvent::Restart));
    }

    #[test]
    fn test_abandon_produces_no_result() {
        let mut s = Session::new(9);
        s.apply(SessionEvent::Start(GameMode::Classic));
        let round_id = s.round_id();
        s.apply(SessionEvent::Tick(5_000));

        assert!(s.apply(SessionEvent::Restart));
        assert_eq!(s.screen(), Screen::Menu);
        assert!(s.take_finished().is_none());
        assert!(!s.apply(SessionEvent::QuestionTimeout { round_id }));
    }

    #[test]
    fn test_play_again_reuses_mode() {
        let mut s = Session::new(9).with_duration_ms(30_000);
        s.apply(SessionEvent::Start(GameMode::GridHunt));
        answer_correctly(&mut s);
        s.apply(SessionEvent::Tick(30_000));
        s.take_finished();

        assert!(s.apply(SessionEvent::PlayAgain));
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.mode(), GameMode::GridHunt);
        assert_eq!(s.correct(), 0);
        assert_eq!(s.remaining_ms(), 30_000);
        assert_eq!(s.episode_id(), 2);
    }

    #[test]
    fn test_play_again_only_from_results() {
        let mut s = Session::new(9);
        assert!(!s.apply(SessionEvent::PlayAgain));
        s.apply(SessionEvent::Start(GameMode::Classic));
        assert!(!s.apply(SessionEvent::PlayAgain));
    }

    #[test]
    fn test_set_duration_clamps() {
        let mut s = Session::new(1);
        assert!(s.apply(SessionEvent::SetDuration(5_000)));
        assert_eq!(s.total_duration_ms(), MIN_DURATION_MS);
        assert!(s.apply(SessionEvent::SetDuration(900_000)));
        assert_eq!(s.total_duration_ms(), MAX_DURATION_MS);
        assert_eq!(s.remaining_ms(), MAX_DURATION_MS);

        s.apply(SessionEvent::Start(GameMode::Classic));
        assert!(!s.apply(SessionEvent::SetDuration(30_000)));
        assert_eq!(s.total_duration_ms(), MAX_DURATION_MS);
    }

    #[test]
    fn test_same_seed_same_questions() {
        let mut a = Session::new(77);
        let mut b = Session::new(77);
        a.apply(SessionEvent::Start(GameMode::Classic));
        b.apply(SessionEvent::Start(GameMode::Classic));
        for _ in 0..10 {
            assert_eq!(a.round(), b.round());
            answer_correctly(&mut a);
            answer_correctly(&mut b);
        }
    }

    #[test]
    fn test_snapshot_reflects_round() {
        let mut s = Session::new(2);
        s.apply(SessionEvent::Start(GameMode::Classic));
        let q = classic(&s);
        let snap = s.snapshot();

        assert_eq!(snap.screen, Screen::Playing);
        assert_eq!(snap.seed, 2);
        match snap.round {
            RoundSnapshot::Classic {
                prompt,
                options,
                time_left_ms,
                time_total_ms,
            } => {
                assert_eq!(prompt, q.prompt);
                assert_eq!(options, q.options);
                assert_eq!(time_left_ms, 3500);
                assert_eq!(time_total_ms, 3500);
            }
            other => panic!("unexpected round snapshot {:?}", other),
        }
    }
}
