//! End-to-end session scenarios driven through the engine queue.

use tui_mathrush::core::{per_question_time_ms, Feedback, Round, Session};
use tui_mathrush::engine::GameDriver;
use tui_mathrush::types::{GameMode, Screen, SessionEvent};

fn started(mode: GameMode, duration_ms: u32) -> GameDriver {
    let mut driver = GameDriver::new(Session::new(2024).with_duration_ms(duration_ms));
    driver.push(SessionEvent::Start(mode));
    driver.drain();
    driver
}

fn expected(driver: &GameDriver) -> i32 {
    driver
        .session()
        .round()
        .map(Round::expected)
        .expect("a round is on screen")
}

fn wrong(driver: &GameDriver) -> i32 {
    match driver.session().round() {
        Some(Round::Classic(q)) => *q.options.iter().find(|&&v| v != q.answer).unwrap(),
        Some(Round::Grid(g)) => g.product + g.base,
        None => panic!("no round"),
    }
}

#[test]
fn five_consecutive_correct_answers_reach_level_two_on_the_fifth() {
    let mut driver = started(GameMode::Classic, 60_000);

    for n in 1..=5 {
        driver.advance_by(100);
        assert_eq!(driver.session().level(), 1, "before answer {}", n);
        let answer = expected(&driver);
        driver.push(SessionEvent::Answer(answer));
        driver.drain();
    }

    assert_eq!(driver.session().correct(), 5);
    assert_eq!(driver.session().streak(), 5);
    assert_eq!(driver.session().level(), 2);
    assert_eq!(
        driver.session().question_time_left_ms(),
        Some(per_question_time_ms(2))
    );
}

#[test]
fn a_full_minute_of_ticks_ends_in_results_exactly_once() {
    let mut driver = started(GameMode::GridHunt, 60_000);

    let mut results = Vec::new();
    for _ in 0..(60_000 / 16 + 10) {
        results.extend(driver.advance_by(16));
    }

    assert_eq!(driver.session().screen(), Screen::Results);
    assert_eq!(driver.session().remaining_ms(), 0);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].mode, GameMode::GridHunt);
}

#[test]
fn a_level_nine_timeout_is_a_miss_and_keeps_the_level() {
    let mut driver = started(GameMode::Classic, 180_000);

    // 40 correct answers put the session on level 9.
    for _ in 0..40 {
        let answer = expected(&driver);
        driver.push(SessionEvent::Answer(answer));
        driver.drain();
    }
    assert_eq!(driver.session().level(), 9);
    let missed_before = driver.session().missed();
    let round_before = driver.session().round_id();

    driver.advance_by(per_question_time_ms(9));

    assert_eq!(driver.session().missed(), missed_before + 1);
    assert_eq!(driver.session().streak(), 0);
    assert_eq!(driver.session().level(), 9);
    assert_ne!(driver.session().round_id(), round_before);
    assert!(matches!(
        driver.session().last_feedback(),
        Some(Feedback::TimedOut { .. })
    ));
    assert_eq!(
        driver.session().question_time_left_ms(),
        Some(per_question_time_ms(9))
    );
}

#[test]
fn pause_freezes_the_countdown_and_the_question_deadline() {
    let mut driver = started(GameMode::Classic, 60_000);
    driver.advance_by(1_000);

    let remaining = driver.session().remaining_ms();
    let question_left = driver.session().question_time_left_ms();

    driver.push(SessionEvent::TogglePause);
    driver.advance_by(30_000);
    assert!(driver.session().paused());
    assert_eq!(driver.session().remaining_ms(), remaining);
    assert_eq!(driver.session().question_time_left_ms(), question_left);
    assert_eq!(driver.session().missed(), 0);

    // Answers are ignored while paused.
    let answer = expected(&driver);
    driver.push(SessionEvent::Answer(answer));
    driver.drain();
    assert_eq!(driver.session().correct(), 0);

    driver.push(SessionEvent::TogglePause);
    driver.advance_by(500);
    assert_eq!(driver.session().remaining_ms(), remaining - 500);
}

#[test]
fn a_stale_timeout_does_not_touch_the_new_round() {
    let mut driver = started(GameMode::Classic, 60_000);
    let stale = driver.session().round_id();

    let answer = expected(&driver);
    driver.push(SessionEvent::Answer(answer));
    driver.advance_by(per_question_time_ms(1) - 1);
    driver.push(SessionEvent::QuestionTimeout { round_id: stale });
    driver.drain();

    assert_eq!(driver.session().correct(), 1);
    assert_eq!(driver.session().missed(), 0);
}

#[test]
fn grid_hunt_mixes_hits_and_misses_without_a_question_timer() {
    let mut driver = started(GameMode::GridHunt, 30_000);

    let hit = expected(&driver);
    driver.push(SessionEvent::Answer(hit));
    driver.drain();
    let miss = wrong(&driver);
    driver.push(SessionEvent::Answer(miss));
    driver.advance_by(20_000);

    let session = driver.session();
    assert_eq!(session.correct(), 1);
    assert_eq!(session.missed(), 1);
    assert_eq!(session.level(), 1);
    assert_eq!(session.accuracy(), 50);
    assert_eq!(session.question_time_left_ms(), None);
}

#[test]
fn restart_abandons_without_a_result_and_play_again_reuses_the_mode() {
    let mut driver = started(GameMode::Classic, 30_000);
    driver.push(SessionEvent::Restart);
    assert!(driver.drain().is_empty());
    assert_eq!(driver.session().screen(), Screen::Menu);

    driver.push(SessionEvent::SetDuration(45_000));
    driver.push(SessionEvent::Start(GameMode::GridHunt));
    driver.drain();
    assert_eq!(driver.session().total_duration_ms(), 50_000);

    let results = driver.advance_by(50_000);
    assert_eq!(results.len(), 1);

    let episode = driver.session().episode_id();
    driver.push(SessionEvent::PlayAgain);
    driver.drain();
    assert_eq!(driver.session().screen(), Screen::Playing);
    assert_eq!(driver.session().mode(), GameMode::GridHunt);
    assert_eq!(driver.session().episode_id(), episode + 1);
    assert_eq!(driver.session().correct(), 0);
}

#[test]
fn same_seed_gives_the_same_questions() {
    let a = started(GameMode::Classic, 60_000);
    let b = started(GameMode::Classic, 60_000);
    assert_eq!(a.session().round(), b.session().round());
}
