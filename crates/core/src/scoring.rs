//! Scoring module - accuracy, streaks, leveling and question pacing
//!
//! Everything here is a pure function of the running counters, so derived
//! stats can be recomputed at any time and never drift from `correct`/`missed`.

use crate::types::{BASE_QUESTION_MS, CORRECT_PER_LEVEL, QUESTION_MS_FLOOR, QUESTION_MS_STEP};

/// Accuracy percentage (0-100), rounded half up. Zero when nothing was attempted.
pub fn accuracy(correct: u32, missed: u32) -> u8 {
    let attempts = correct as u64 + missed as u64;
    if attempts == 0 {
        return 0;
    }
    ((200 * correct as u64 + attempts) / (2 * attempts)) as u8
}

/// Level implied by a correct count: one level per five correct answers
pub fn level_for_correct(correct: u32) -> u32 {
    correct / CORRECT_PER_LEVEL + 1
}

/// Level after an answer; levels only ever go up within a session
pub fn next_level(current: u32, correct: u32) -> u32 {
    current.max(level_for_correct(correct))
}

/// Streak after an answer
pub fn next_streak(streak: u32, was_correct: bool) -> u32 {
    if was_correct {
        streak.saturating_add(1)
    } else {
        0
    }
}

/// Time allowed for a Classic question at `level` (in milliseconds)
///
/// Starts at 3500ms, loses 200ms per level, never below 1200ms.
pub fn per_question_time_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(QUESTION_MS_STEP);
    BASE_QUESTION_MS
        .saturating_sub(reduction)
        .clamp(QUESTION_MS_FLOOR, BASE_QUESTION_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accuracy_no_attempts() {
        assert_eq!(accuracy(0, 0), 0);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy(1, 0), 100);
        assert_eq!(accuracy(0, 4), 0);
        assert_eq!(accuracy(1, 1), 50);
        assert_eq!(accuracy(2, 1), 67); // 66.67
        assert_eq!(accuracy(1, 2), 33); // 33.33
        assert_eq!(accuracy(1, 7), 13); // 12.5 rounds up
    }

    #[test]
    fn test_level_for_correct() {
        assert_eq!(level_for_correct(0), 1);
        assert_eq!(level_for_correct(4), 1);
        assert_eq!(level_for_correct(5), 2);
        assert_eq!(level_for_correct(14), 3);
        assert_eq!(level_for_correct(40), 9);
    }

    #[test]
    fn test_next_level_never_decreases() {
        assert_eq!(next_level(4, 0), 4);
        assert_eq!(next_level(1, 10), 3);
    }

    #[test]
    fn test_streak() {
        assert_eq!(next_streak(0, true), 1);
        assert_eq!(next_streak(6, true), 7);
        assert_eq!(next_streak(6, false), 0);
    }

    #[test]
    fn test_question_times() {
        assert_eq!(per_question_time_ms(0), 3500);
        assert_eq!(per_question_time_ms(1), 3500);
        assert_eq!(per_question_time_ms(2), 3300);
        assert_eq!(per_question_time_ms(9), 1900);
        assert_eq!(per_question_time_ms(12), 1300);
        assert_eq!(per_question_time_ms(13), 1200); // Floor
        assert_eq!(per_question_time_ms(u32::MAX), 1200);
    }

    proptest! {
        #[test]
        fn question_time_is_monotonic_and_bounded(level in 1u32..10_000) {
            let now = per_question_time_ms(level);
            let next = per_question_time_ms(level + 1);
            prop_assert!(next <= now);
            prop_assert!((1200..=3500).contains(&now));
        }

        #[test]
        fn accuracy_matches_rounded_ratio(correct in 0u32..10_000, missed in 0u32..10_000) {
            let acc = accuracy(correct, missed);
            prop_assert!(acc <= 100);
            if correct + missed > 0 {
                let expected = (100.0 * correct as f64 / (correct + missed) as f64).round() as u8;
                prop_assert_eq!(acc, expected);
            }
        }
    }
}
