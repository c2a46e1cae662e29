//! Classic question generation
//!
//! Builds an arithmetic prompt for a level, its answer and four shuffled
//! options. Difficulty scales in three ways with level:
//!
//! - operand range: `10 + level * 6`
//! - operators: `+` below level 3, `+ -` below level 6, `+ - ×` from level 6
//! - distractor spread: `max(3, floor(level * 1.5))` around the answer
//!
//! Option selection is total: rejection sampling has a fixed budget and falls
//! back to a deterministic outward walk, so generation never loops forever
//! even when clamping collapses the candidate pool.

use std::fmt;

use arrayvec::ArrayVec;

use crate::rng::QuizRng;
use crate::types::{DISTRACTOR_ATTEMPTS, OPTION_COUNT, VALUE_LIMIT, WIDE_DISTRACTORS};

/// Arithmetic operator of a Classic prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
        }
    }

    pub fn apply(&self, lhs: i32, rhs: i32) -> i32 {
        match self {
            Operation::Add => lhs + rhs,
            Operation::Subtract => lhs - rhs,
            Operation::Multiply => lhs * rhs,
        }
    }
}

/// A two-operand arithmetic expression, e.g. `12 + 7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prompt {
    pub lhs: i32,
    pub op: Operation,
    pub rhs: i32,
}

impl Prompt {
    pub fn answer(&self) -> i32 {
        self.op.apply(self.lhs, self.rhs)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// One Classic question
///
/// `options` holds exactly [`OPTION_COUNT`] distinct values in display order,
/// with `answer` appearing exactly once. The deadline lives on the session,
/// not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassicRound {
    pub prompt: Prompt,
    pub answer: i32,
    pub options: [i32; OPTION_COUNT],
}

impl ClassicRound {
    pub fn is_correct(&self, choice: i32) -> bool {
        choice == self.answer
    }
}

/// Operand upper bound for a level (`10 + level * 6`)
pub fn operand_range(level: u32) -> i32 {
    10 + level.min(10_000) as i32 * 6
}

/// Half-width of the close distractor band (`max(3, floor(level * 1.5))`)
pub fn distractor_spread(level: u32) -> i32 {
    let level = level.min(10_000) as i32;
    (level * 3 / 2).max(3)
}

fn clamp_value(v: i32) -> i32 {
    v.clamp(-VALUE_LIMIT, VALUE_LIMIT)
}

/// Pick the operator for a level
fn choose_operation(level: u32, rng: &mut QuizRng) -> Operation {
    match level {
        0..=2 => Operation::Add,
        3..=5 => {
            if rng.range_inclusive(0, 1) == 0 {
                Operation::Add
            } else {
                Operation::Subtract
            }
        }
        _ => match rng.range_inclusive(0, 2) {
            0 => Operation::Add,
            1 => Operation::Subtract,
            _ => Operation::Multiply,
        },
    }
}

/// Generate the prompt for a level
pub fn generate_prompt(level: u32, rng: &mut QuizRng) -> Prompt {
    let level = level.max(1);
    let range = operand_range(level);
    let a = rng.range_inclusive(0, range);
    let b = rng.range_inclusive(0, range);

    match choose_operation(level, rng) {
        Operation::Add => Prompt {
            lhs: a,
            op: Operation::Add,
            rhs: b,
        },
        Operation::Subtract => Prompt {
            lhs: a.max(b),
            op: Operation::Subtract,
            rhs: a.min(b),
        },
        Operation::Multiply => {
            let bound = (range / 2).min(12);
            Prompt {
                lhs: rng.range_inclusive(0, bound),
                op: Operation::Multiply,
                rhs: rng.range_inclusive(0, bound),
            }
        }
    }
}

/// Draw one candidate from the distractor pool without materializing it.
///
/// The pool is the close band `answer ± spread` followed by
/// [`WIDE_DISTRACTORS`] slots, each holding a uniform offset in `±2·range`.
fn sample_distractor(answer: i32, level: u32, rng: &mut QuizRng) -> i32 {
    let spread = distractor_spread(level);
    let band = (2 * spread + 1) as usize;

    let k = rng.index(band + WIDE_DISTRACTORS);
    let offset = if k < band {
        k as i32 - spread
    } else {
        let wide = 2 * operand_range(level);
        rng.range_inclusive(-wide, wide)
    };
    clamp_value(answer.saturating_add(offset))
}

/// Choose three distinct wrong values for `answer`.
pub fn pick_distractors(
    answer: i32,
    level: u32,
    rng: &mut QuizRng,
) -> ArrayVec<i32, { OPTION_COUNT - 1 }> {
    let mut out: ArrayVec<i32, { OPTION_COUNT - 1 }> = ArrayVec::new();

    let mut attempts = 0;
    while !out.is_full() && attempts < DISTRACTOR_ATTEMPTS {
        attempts += 1;
        let candidate = sample_distractor(answer, level, rng);
        if candidate != answer && !out.contains(&candidate) {
            out.push(candidate);
        }
    }

    if !out.is_full() {
        fill_distractors(answer, &mut out);
    }
    out
}

/// Walk outward from the clamped answer until the set is full.
///
/// The value range holds far more than four values, so this always finishes.
fn fill_distractors(answer: i32, out: &mut ArrayVec<i32, { OPTION_COUNT - 1 }>) {
    let center = clamp_value(answer);
    for step in 0..=(2 * VALUE_LIMIT) {
        for candidate in [center + step, center - step] {
            if out.is_full() {
                return;
            }
            if (-VALUE_LIMIT..=VALUE_LIMIT).contains(&candidate)
                && candidate != answer
                && !out.contains(&candidate)
            {
                out.push(candidate);
            }
        }
    }
}

/// Generate a Classic question for `level` (values below 1 are treated as 1).
pub fn generate_question(level: u32, rng: &mut QuizRng) -> ClassicRound {
    let level = level.max(1);
    let prompt = generate_prompt(level, rng);
    let answer = prompt.answer();
    let distractors = pick_distractors(answer, level, rng);

    let mut options = [answer; OPTION_COUNT];
    for (slot, value) in options.iter_mut().skip(1).zip(distractors) {
        *slot = value;
    }
    rng.shuffle(&mut options);

    ClassicRound {
        prompt,
        answer,
        options,
    }
}
