//! Property tests over random event sequences.

use proptest::prelude::*;

use tui_mathrush::core::{Round, Session};
use tui_mathrush::types::{GameMode, Screen, SessionEvent};

#[derive(Debug, Clone)]
enum Step {
    Tick(u32),
    Right,
    Wrong,
    Pause,
    Timeout,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u32..2_000).prop_map(Step::Tick),
        Just(Step::Right),
        Just(Step::Wrong),
        Just(Step::Pause),
        Just(Step::Timeout),
    ]
}

fn mode() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Classic), Just(GameMode::GridHunt)]
}

fn event_for(session: &Session, step: &Step) -> SessionEvent {
    match step {
        Step::Tick(ms) => SessionEvent::Tick(*ms),
        Step::Pause => SessionEvent::TogglePause,
        Step::Timeout => SessionEvent::QuestionTimeout {
            round_id: session.round_id(),
        },
        Step::Right => SessionEvent::Answer(session.round().map(Round::expected).unwrap_or(0)),
        Step::Wrong => SessionEvent::Answer(match session.round() {
            Some(Round::Classic(q)) => q.answer + 1_000,
            Some(Round::Grid(g)) => -g.product,
            None => 0,
        }),
    }
}

proptest! {
    #[test]
    fn counters_stay_consistent(
        seed in any::<u64>(),
        mode in mode(),
        steps in prop::collection::vec(step(), 1..200),
    ) {
        let mut session = Session::new(seed).with_duration_ms(30_000);
        session.apply(SessionEvent::Start(mode));

        let mut last_level = session.level();
        let mut results = 0;
        for step in &steps {
            let event = event_for(&session, step);
            session.apply(event);
            if session.take_finished().is_some() {
                results += 1;
            }

            // Levels never drop within a session.
            prop_assert!(session.level() >= last_level);
            last_level = session.level();

            prop_assert!(session.accuracy() <= 100);
            prop_assert!(session.streak() <= session.best_streak());
            prop_assert!(session.best_streak() <= session.correct());
            prop_assert!(session.remaining_ms() <= session.total_duration_ms());
            if mode == GameMode::GridHunt {
                prop_assert_eq!(session.level(), 1);
            }
            if session.screen() == Screen::Playing {
                prop_assert!(session.round().is_some());
            }
        }

        prop_assert!(results <= 1);
        prop_assert_eq!(results == 1, session.screen() == Screen::Results);
    }
}
