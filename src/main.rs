//! Terminal Math Rush runner (default binary).
//!
//! Polls crossterm for keys, feeds the single-writer [`GameDriver`] and
//! renders with the framebuffer renderer. Finished sessions are handed to
//! the score service, which never blocks the loop.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_mathrush::adapter::{AppConfig, ScoreService, ScoreUpdate};
use tui_mathrush::core::{Session, SessionSnapshot};
use tui_mathrush::engine::GameDriver;
use tui_mathrush::input::{should_quit, InputHandler};
use tui_mathrush::term::{FrameBuffer, QuizView, ScoreboardView, TerminalRenderer, Viewport};
use tui_mathrush::types::{GameMode, HighScoreEntry, SessionEvent, TICK_MS};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    log::info!(
        "starting: seed={} duration={}ms store={:?}",
        config.seed,
        config.duration_ms,
        config.store
    );

    let scores = ScoreService::new(config.build_store())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, scores);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `MATHRUSH_LOG_PATH` only; the terminal belongs to the UI.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, mut scores: ScoreService) -> Result<()> {
    let identity = config.build_identity();
    let user = identity.current_user();

    let session = Session::new(config.seed).with_duration_ms(config.duration_ms);
    let mut driver = GameDriver::new(session);
    let mut input = InputHandler::new();
    let view = QuizView::default();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();
    let mut board_mode = GameMode::default();
    let mut top_scores: Vec<HighScoreEntry> = Vec::new();

    if let Some(user) = &user {
        scores.request_top_scores(&user.id, board_mode);
    }

    let frame = Duration::from_millis(TICK_MS as u64);
    driver.advance_to(Instant::now());

    loop {
        // Render.
        driver.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let board = ScoreboardView {
            player: user.as_ref().map(|u| u.display_name.as_str()),
            mode: board_mode,
            entries: &top_scores,
        };
        view.render_into(&snap, input.cursor(), Some(&board), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        break;
                    }
                    for session_event in input.handle_key(key, &snap) {
                        if let (SessionEvent::Start(mode), Some(user)) = (session_event, &user) {
                            if mode != board_mode {
                                board_mode = mode;
                                top_scores.clear();
                                scores.request_top_scores(&user.id, mode);
                            }
                        }
                        driver.push(session_event);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Time.
        for result in driver.advance_to(Instant::now()) {
            match &user {
                Some(user) => scores.submit(&user.id, result),
                None => log::debug!("anonymous session, result not saved"),
            }
        }

        // Store replies.
        while let Some(update) = scores.try_recv() {
            if let ScoreUpdate::TopScores { mode, entries } = update {
                if mode == board_mode {
                    top_scores = entries;
                }
            }
        }
    }

    scores.shutdown(SHUTDOWN_GRACE);
    Ok(())
}
