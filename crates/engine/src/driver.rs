//! Single-writer driver that feeds a [`Session`] from one ordered queue.
//!
//! Timer ticks, question-deadline checks and player intents all pass through
//! the same FIFO and are applied one at a time, so no two transitions ever
//! interleave on the counters.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::core::{Session, SessionSnapshot};
use crate::types::{Screen, SessionEvent, SessionResult, MAX_TICK_MS};

/// Owns the session and the event queue.
#[derive(Debug, Clone)]
pub struct GameDriver {
    session: Session,
    queue: VecDeque<SessionEvent>,
    last_advance: Option<Instant>,
    /// Sub-millisecond remainder carried into the next advance.
    carry: Duration,
    max_tick_ms: u32,
}

impl GameDriver {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            queue: VecDeque::new(),
            last_advance: None,
            carry: Duration::ZERO,
            max_tick_ms: MAX_TICK_MS,
        }
    }

    /// Override the largest single tick (mainly for tests).
    pub fn with_max_tick_ms(mut self, max_tick_ms: u32) -> Self {
        self.max_tick_ms = max_tick_ms.max(1);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
    }

    /// Number of queued, not yet applied events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue an event behind everything already pending.
    pub fn push(&mut self, event: SessionEvent) {
        self.queue.push_back(event);
    }

    /// Queue the real time elapsed since the previous call, then drain.
    ///
    /// The first call only records the starting instant.
    pub fn advance_to(&mut self, now: Instant) -> Vec<SessionResult> {
        let Some(last) = self.last_advance.replace(now) else {
            return self.drain();
        };

        let total = self.carry + now.saturating_duration_since(last);
        let whole_ms = total.as_millis().min(u32::MAX as u128) as u32;
        self.carry = total.saturating_sub(Duration::from_millis(whole_ms as u64));

        self.push_elapsed(whole_ms);
        self.drain()
    }

    /// Queue `elapsed_ms` of play time as one or more ticks, then drain.
    pub fn advance_by(&mut self, elapsed_ms: u32) -> Vec<SessionResult> {
        self.push_elapsed(elapsed_ms);
        self.drain()
    }

    fn push_elapsed(&mut self, mut elapsed_ms: u32) {
        while elapsed_ms > 0 {
            let step = elapsed_ms.min(self.max_tick_ms);
            self.queue.push_back(SessionEvent::Tick(step));
            elapsed_ms -= step;
        }
    }

    /// Apply every queued event in order.
    ///
    /// After each tick the question deadline is checked and, if it has
    /// passed, the timeout is applied before anything queued later.
    /// Returns the results of sessions that finished during the drain.
    pub fn drain(&mut self) -> Vec<SessionResult> {
        let mut finished = Vec::new();

        while let Some(event) = self.queue.pop_front() {
            let before = self.session.screen();
            let changed = self.session.apply(event);

            if changed && !matches!(event, SessionEvent::Tick(_)) {
                log::trace!("applied {}", event.as_str());
            }

            if let SessionEvent::Tick(_) = event {
                if let Some(timeout) = self.session.timeout_due() {
                    self.queue.push_front(timeout);
                }
            }

            let after = self.session.screen();
            if before != after {
                log::debug!(
                    "screen {} -> {} (episode {})",
                    before.as_str(),
                    after.as_str(),
                    self.session.episode_id()
                );
            }

            if let Some(result) = self.session.take_finished() {
                log::info!(
                    "session finished: mode={} score={} accuracy={} level={}",
                    result.mode.as_str(),
                    result.score,
                    result.accuracy,
                    result.level
                );
                finished.push(result);
            }
        }

        finished
    }
}
