//! Interactive operator sessions.
//!
//! Both modes talk to the operator through a [`Console`], which wraps any
//! `BufRead`/`Write` pair, so the same flow runs against stdin/stdout in the
//! binary and against scripted buffers in tests.

use thiserror::Error;

use crate::model::ModelError;
use crate::records::RecordError;

mod classify;
mod console;
mod enter;

pub use classify::{ClassifySummary, ReviewEvent, ReviewOutcome, ReviewState, classify_new_reviews};
pub use console::Console;
pub use enter::{EnterSummary, enter_new_reviews};

/// Operator input that cannot be acted on. The display text is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Invalid input. The program is terminated.")]
    MenuChoice(String),
    #[error("Invalid input. The classification has not been updated.")]
    CorrectionLabel(String),
}

/// Failures that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Console I/O failed: {0}")]
    Console(#[from] std::io::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Records(#[from] RecordError),
}

/// Parse a correction answer; only `0` (negative) and `1` (positive) are accepted.
pub fn parse_correction(input: &str) -> Result<bool, InvalidInput> {
    match input.trim().parse::<i32>() {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(InvalidInput::CorrectionLabel(input.to_string())),
    }
}

/// `y` or `yes`, ignoring case and surrounding whitespace.
pub fn is_affirmative(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
