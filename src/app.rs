//! Entry point flow: make sure a model exists, ask for a mode, dispatch.

use std::io::{BufRead, Write};

use crate::config::ReviewPaths;
use crate::model::ModelLifecycle;
use crate::session::{self, Console, InvalidInput, SessionError};

/// Top-level menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EnterReviews,
    ClassifyReviews,
}

impl MenuChoice {
    /// `1` enters new reviews, `2` classifies staged ones; anything else is invalid.
    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        match input.trim().parse::<i32>() {
            Ok(1) => Ok(Self::EnterReviews),
            Ok(2) => Ok(Self::ClassifyReviews),
            _ => Err(InvalidInput::MenuChoice(input.to_string())),
        }
    }
}

/// What a run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Entered(session::EnterSummary),
    Classified(session::ClassifySummary),
    InvalidChoice,
}

/// Run one interactive session against `paths`.
///
/// A missing model artifact is trained before the menu is shown. An invalid
/// menu answer (or end of input) prints a message and returns normally.
pub fn run<L, R, W>(
    lifecycle: &L,
    paths: &ReviewPaths,
    console: &mut Console<R, W>,
) -> Result<RunOutcome, SessionError>
where
    L: ModelLifecycle,
    R: BufRead,
    W: Write,
{
    if !lifecycle.model_exists() {
        tracing::info!("No model at {}; training one", lifecycle.model_path().display());
        lifecycle.retrain()?;
        console.say(format!(
            "Model saved to {}",
            lifecycle.model_path().display()
        ))?;
    }

    let answer = console
        .ask("Would you like to enter new reviews (1) or classify existing reviews (2)?")?
        .unwrap_or_default();
    let choice = match MenuChoice::parse(&answer) {
        Ok(choice) => choice,
        Err(err) => {
            tracing::info!("Invalid menu choice {:?}", answer);
            console.say(err)?;
            return Ok(RunOutcome::InvalidChoice);
        }
    };

    match choice {
        MenuChoice::EnterReviews => {
            session::enter_new_reviews(lifecycle, &paths.new_reviews, console)
                .map(RunOutcome::Entered)
        }
        MenuChoice::ClassifyReviews => session::classify_new_reviews(
            lifecycle,
            &paths.training_data,
            &paths.new_reviews,
            console,
        )
        .map(RunOutcome::Classified),
    }
}
