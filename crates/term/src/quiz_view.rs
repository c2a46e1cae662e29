//! QuizView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Feedback, Prompt, RoundSnapshot, SessionSnapshot};
use crate::fb::{text_width, u32_width, CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, HighScoreEntry, Screen, GRID_SIZE, OPTION_COUNT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Player and leaderboard data shown next to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreboardView<'a> {
    /// Display name; `None` when playing anonymously
    pub player: Option<&'a str>,
    /// Mode the entries belong to
    pub mode: GameMode,
    pub entries: &'a [HighScoreEntry],
}

/// Key labels of the Grid Hunt cells, in slot order.
pub const GRID_KEYS: [char; GRID_SIZE] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='];

const CARD_W: u16 = 48;
const CARD_H: u16 = 18;
const LEADERBOARD_ROWS: usize = 5;

const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const MUTED: CellStyle = CellStyle::fg(Rgb::new(130, 130, 140));
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const ACCENT: CellStyle = CellStyle::fg(Rgb::new(240, 200, 80)).bold();
const GOOD: CellStyle = CellStyle::fg(Rgb::new(100, 220, 120));
const BAD: CellStyle = CellStyle::fg(Rgb::new(220, 90, 90));
const BAR_BG: Rgb = Rgb::new(45, 45, 55);

/// Inner drawing area of the card.
#[derive(Debug, Clone, Copy)]
struct Card {
    x: u16,
    y: u16,
    w: u16,
}

impl Card {
    fn row(&self, n: u16) -> u16 {
        self.y.saturating_add(n)
    }
}

/// A fixed-size card renderer for the quiz screens.
#[derive(Debug, Clone)]
pub struct QuizView {
    card_w: u16,
    card_h: u16,
    anchor_y: AnchorY,
}

impl Default for QuizView {
    fn default() -> Self {
        Self {
            card_w: CARD_W,
            card_h: CARD_H,
            anchor_y: AnchorY::Center,
        }
    }
}

impl QuizView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// `cursor` is the highlighted slot of the input handler.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: usize,
        scores: Option<&ScoreboardView<'_>>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = self.card_w.min(viewport.width);
        let h = self.card_h.min(viewport.height);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        fb.draw_box(x, y, w, h, BORDER);

        let card = Card {
            x: x.saturating_add(2),
            y: y.saturating_add(1),
            w: w.saturating_sub(4),
        };
        let footer = card.row(h.saturating_sub(3));

        match snap.screen {
            Screen::Menu => self.draw_menu(fb, snap, scores, card, footer),
            Screen::Playing => {
                self.draw_playing(fb, snap, cursor, card, footer);
                if snap.paused {
                    self.draw_pause_overlay(fb, card);
                }
            }
            Screen::Results => self.draw_results(fb, snap, scores, card, footer),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        cursor: usize,
        scores: Option<&ScoreboardView<'_>>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, scores, viewport, &mut fb);
        fb
    }

    fn draw_menu(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        scores: Option<&ScoreboardView<'_>>,
        card: Card,
        footer: u16,
    ) {
        fb.put_str_centered(card.x, card.row(0), card.w, "M A T H   R U S H", ACCENT);

        let x = fb.put_str(card.x, card.row(2), "[1] ", MUTED);
        let x = fb.put_str(x, card.row(2), GameMode::Classic.label(), TEXT.bold());
        fb.put_str(x, card.row(2), "  four choices, beat the clock", MUTED);
        let x = fb.put_str(card.x, card.row(3), "[2] ", MUTED);
        let x = fb.put_str(x, card.row(3), GameMode::GridHunt.label(), TEXT.bold());
        fb.put_str(x, card.row(3), "  find the product", MUTED);

        self.draw_duration(fb, snap, card.x, card.row(5));
        self.draw_player(fb, scores, card.x, card.row(6));
        if let Some(board) = scores {
            self.draw_leaderboard(fb, board, card, card.row(8));
        }

        fb.put_str(card.x, footer, "1/2 start  +/- duration  q quit", MUTED);
    }

    fn draw_playing(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        cursor: usize,
        card: Card,
        footer: u16,
    ) {
        // Header: mode, level, countdown.
        let header = card.row(0);
        let x = fb.put_str(card.x, header, snap.mode.label(), ACCENT);
        if snap.mode == GameMode::Classic {
            let x = fb.put_str(x.saturating_add(3), header, "LV ", MUTED);
            fb.put_u32(x, header, snap.level, TEXT.bold());
        }
        let clock_x = card.x.saturating_add(card.w).saturating_sub(5);
        put_clock(fb, clock_x, header, snap.remaining_ms, TEXT.bold());

        // Counters.
        let stats = card.row(1);
        let x = fb.put_str(card.x, stats, "✓ ", GOOD);
        let x = fb.put_u32(x, stats, snap.correct, TEXT);
        let x = fb.put_str(x.saturating_add(2), stats, "✗ ", BAD);
        let x = fb.put_u32(x, stats, snap.missed, TEXT);
        let x = fb.put_str(x.saturating_add(2), stats, "streak ", MUTED);
        let x = fb.put_u32(x, stats, snap.streak, TEXT);
        let x = fb.put_str(x.saturating_add(2), stats, "acc ", MUTED);
        let x = fb.put_u32(x, stats, snap.accuracy as u32, TEXT);
        fb.put_char(x, stats, '%', TEXT);

        let highlight = snap.playable().then_some(cursor);
        match snap.round {
            RoundSnapshot::Classic {
                prompt,
                options,
                time_left_ms,
                time_total_ms,
            } => {
                draw_prompt(fb, prompt, card, card.row(3));
                self.draw_options(fb, &options, highlight, card, card.row(5));
                draw_time_bar(fb, time_left_ms, time_total_ms, card, card.row(9));
                fb.put_str(card.x, footer, "1-4/arrows+enter answer  p pause  r menu", MUTED);
            }
            RoundSnapshot::Grid { base, factor, grid } => {
                let row = card.row(3);
                let width = 5 + i32_width(base) + 3 + i32_width(factor);
                let x = card.x.saturating_add(card.w.saturating_sub(width) / 2);
                let x = fb.put_str(x, row, "Find ", MUTED);
                let x = fb.put_i32(x, row, base, ACCENT);
                let x = fb.put_str(x, row, " × ", TEXT);
                fb.put_i32(x, row, factor, ACCENT);
                self.draw_grid(fb, &grid, highlight, card, card.row(5));
                fb.put_str(card.x, footer, "arrows+enter or 1-0,-,= pick  p pause", MUTED);
            }
            RoundSnapshot::None => {}
        }

        draw_feedback(fb, snap.last_feedback, card, card.row(11));
    }

    fn draw_options(
        &self,
        fb: &mut FrameBuffer,
        options: &[i32; OPTION_COUNT],
        highlight: Option<usize>,
        card: Card,
        top: u16,
    ) {
        let col_w = card.w / 2;
        for (i, &value) in options.iter().enumerate() {
            let row = top.saturating_add((i / 2) as u16 * 2);
            let x = card.x.saturating_add((i % 2) as u16 * col_w).saturating_add(4);
            let style = if highlight == Some(i) { TEXT.bold().reverse() } else { TEXT.bold() };

            let x = fb.put_char(x, row, '[', MUTED);
            let x = fb.put_u32(x, row, i as u32 + 1, MUTED);
            let x = fb.put_str(x, row, "] ", MUTED);
            let x = fb.put_char(x, row, ' ', style);
            let x = fb.put_i32(x, row, value, style);
            fb.put_char(x, row, ' ', style);
        }
    }

    fn draw_grid(
        &self,
        fb: &mut FrameBuffer,
        grid: &[i32; GRID_SIZE],
        highlight: Option<usize>,
        card: Card,
        top: u16,
    ) {
        let cell_w = card.w / 4;
        for (i, &value) in grid.iter().enumerate() {
            let row = top.saturating_add((i / 4) as u16 * 2);
            let x = card.x.saturating_add((i % 4) as u16 * cell_w).saturating_add(1);
            let style = if highlight == Some(i) { TEXT.bold().reverse() } else { TEXT };

            let x = fb.put_char(x, row, GRID_KEYS[i], MUTED);
            let x = fb.put_char(x, row, ' ', MUTED);
            // Right-align values within 4 columns.
            let pad = 4u16.saturating_sub(i32_width(value));
            fb.fill_rect(x, row, pad, 1, ' ', style);
            let x = fb.put_i32(x.saturating_add(pad), row, value, style);
            fb.put_char(x, row, ' ', style);
        }
    }

    fn draw_results(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        scores: Option<&ScoreboardView<'_>>,
        card: Card,
        footer: u16,
    ) {
        fb.put_str_centered(card.x, card.row(0), card.w, "TIME'S UP", ACCENT);
        fb.put_str_centered(card.x, card.row(1), card.w, snap.mode.label(), MUTED);

        let label_x = card.x.saturating_add(4);
        let value_x = card.x.saturating_add(18);
        let rows: [(&str, u32, &str); 5] = [
            ("Score", snap.correct, ""),
            ("Missed", snap.missed, ""),
            ("Accuracy", snap.accuracy as u32, "%"),
            ("Level", snap.level, ""),
            ("Best streak", snap.best_streak, ""),
        ];
        for (i, (label, value, suffix)) in rows.iter().enumerate() {
            let row = card.row(3 + i as u16);
            fb.put_str(label_x, row, label, MUTED);
            let x = fb.put_u32(value_x, row, *value, TEXT.bold());
            fb.put_str(x, row, suffix, TEXT);
        }

        match scores {
            Some(board) if board.mode == snap.mode => {
                self.draw_leaderboard(fb, board, card, card.row(9));
            }
            Some(board) if board.player.is_none() => {
                fb.put_str(card.x, card.row(9), "Set MATHRUSH_USER to keep scores", MUTED);
            }
            _ => {}
        }

        let x = fb.put_str(card.x, footer, "enter again  m menu  +/- ", MUTED);
        let x = fb.put_u32(x, footer, snap.total_duration_ms / 1000, MUTED);
        fb.put_str(x, footer, "s  q quit", MUTED);
    }

    fn draw_duration(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        let x = fb.put_str(x, y, "Session  ", MUTED);
        let x = fb.put_str(x, y, "< ", MUTED);
        let x = fb.put_u32(x, y, snap.total_duration_ms / 1000, TEXT.bold());
        let x = fb.put_str(x, y, "s", TEXT.bold());
        fb.put_str(x, y, " >", MUTED);
    }

    fn draw_player(&self, fb: &mut FrameBuffer, scores: Option<&ScoreboardView<'_>>, x: u16, y: u16) {
        let x = fb.put_str(x, y, "Player   ", MUTED);
        match scores.and_then(|s| s.player) {
            Some(name) => fb.put_str(x, y, name, TEXT.bold()),
            None => fb.put_str(x, y, "guest (scores not saved)", MUTED),
        };
    }

    fn draw_leaderboard(&self, fb: &mut FrameBuffer, board: &ScoreboardView<'_>, card: Card, top: u16) {
        if board.player.is_none() {
            return;
        }
        let x = fb.put_str(card.x, top, "Best ", MUTED);
        fb.put_str(x, top, board.mode.label(), MUTED);

        if board.entries.is_empty() {
            fb.put_str(card.x.saturating_add(2), top.saturating_add(1), "no scores yet", MUTED);
            return;
        }

        for (i, entry) in board.entries.iter().take(LEADERBOARD_ROWS).enumerate() {
            let row = top.saturating_add(1 + i as u16);
            let x = card.x.saturating_add(2);
            let x = fb.put_u32(x, row, i as u32 + 1, MUTED);
            let x = fb.put_str(x, row, ". ", MUTED);
            let pad = 4u16.saturating_sub(u32_width(entry.score));
            let x = fb.put_u32(x.saturating_add(pad), row, entry.score, TEXT.bold());
            let x = fb.put_str(x, row, "  ", MUTED);
            let x = fb.put_u32(x, row, entry.accuracy as u32, TEXT);
            let x = fb.put_str(x, row, "%  L", MUTED);
            fb.put_u32(x, row, entry.level, TEXT);
        }
    }

    fn draw_pause_overlay(&self, fb: &mut FrameBuffer, card: Card) {
        let w = 24.min(card.w);
        let x = card.x.saturating_add(card.w.saturating_sub(w) / 2);
        let y = card.row(4);
        fb.fill_rect(x, y, w, 5, ' ', CellStyle::default());
        fb.draw_box(x, y, w, 5, BORDER);
        fb.put_str_centered(x, y.saturating_add(1), w, "PAUSED", ACCENT);
        fb.put_str_centered(x, y.saturating_add(3), w, "p to resume", MUTED);
    }
}

fn draw_prompt(fb: &mut FrameBuffer, prompt: Prompt, card: Card, row: u16) {
    let width = i32_width(prompt.lhs) + 3 + i32_width(prompt.rhs) + 4;
    let x = card.x.saturating_add(card.w.saturating_sub(width) / 2);
    let style = TEXT.bold();

    let x = fb.put_i32(x, row, prompt.lhs, style);
    let x = fb.put_char(x, row, ' ', style);
    let x = fb.put_char(x, row, prompt.op.symbol(), ACCENT);
    let x = fb.put_char(x, row, ' ', style);
    let x = fb.put_i32(x, row, prompt.rhs, style);
    fb.put_str(x, row, " = ?", style);
}

fn draw_time_bar(fb: &mut FrameBuffer, left_ms: u32, total_ms: u32, card: Card, row: u16) {
    let bar_w = card.w.saturating_sub(7);
    let filled = if total_ms == 0 {
        0
    } else {
        ((left_ms.min(total_ms) as u64 * bar_w as u64) / total_ms as u64) as u16
    };
    let style = if left_ms.saturating_mul(3) < total_ms { BAD } else { GOOD };

    fb.fill_rect(card.x, row, filled, 1, '█', style);
    fb.fill_rect(
        card.x.saturating_add(filled),
        row,
        bar_w - filled,
        1,
        ' ',
        CellStyle::default().on(BAR_BG),
    );

    // Tenths of a second, e.g. "2.4s".
    let x = card.x.saturating_add(bar_w).saturating_add(1);
    let x = fb.put_u32(x, row, left_ms / 1000, TEXT);
    let x = fb.put_char(x, row, '.', TEXT);
    let x = fb.put_u32(x, row, left_ms % 1000 / 100, TEXT);
    fb.put_char(x, row, 's', TEXT);
}

fn draw_feedback(fb: &mut FrameBuffer, feedback: Option<Feedback>, card: Card, row: u16) {
    let Some(feedback) = feedback else {
        return;
    };
    match feedback {
        Feedback::Correct => {
            fb.put_str_centered(card.x, row, card.w, "✓ correct", GOOD);
        }
        Feedback::Wrong { expected } => {
            let width = text_width("✗ it was ") + i32_width(expected);
            let x = card.x.saturating_add(card.w.saturating_sub(width) / 2);
            let x = fb.put_str(x, row, "✗ it was ", BAD);
            fb.put_i32(x, row, expected, BAD.bold());
        }
        Feedback::TimedOut { expected } => {
            let width = text_width("too slow, it was ") + i32_width(expected);
            let x = card.x.saturating_add(card.w.saturating_sub(width) / 2);
            let x = fb.put_str(x, row, "too slow, it was ", BAD);
            fb.put_i32(x, row, expected, BAD.bold());
        }
    }
}

/// `m:ss`, rounding the remaining time up to the next whole second.
fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, remaining_ms: u32, style: CellStyle) -> u16 {
    let secs = remaining_ms.div_ceil(1000);
    let x = fb.put_u32(x, y, secs / 60, style);
    let x = fb.put_char(x, y, ':', style);
    let x = fb.put_u32(x, y, secs % 60 / 10, style);
    fb.put_u32(x, y, secs % 10, style)
}

fn i32_width(value: i32) -> u16 {
    u32_width(value.unsigned_abs()) + u16::from(value < 0)
}
