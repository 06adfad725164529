use std::io::{BufRead, Write};
use std::path::Path;

use super::enter::load_model;
use super::{Console, InvalidInput, SessionError, is_affirmative, parse_correction};
use crate::model::{ModelLifecycle, SentimentModel};
use crate::records::{self, ReviewRecord, sentiment_name};

const CONFIRM_PROMPT: &str = "Is the classification correct? (y/n)";
const CORRECTION_PROMPT: &str =
    "Please enter the correct classification (0 for negative, 1 for positive):";

/// Per-review confirmation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Predicting,
    AwaitingConfirmation { predicted: bool },
    AwaitingCorrection,
    Done(ReviewOutcome),
}

/// Input that moves a [`ReviewState`] forward.
#[derive(Debug, Clone, Copy)]
pub enum ReviewEvent<'a> {
    Predicted(bool),
    Answer(&'a str),
}

/// How a staged review left the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Operator confirmed the predicted label.
    Accepted(bool),
    /// Operator replaced the prediction with this label.
    Corrected(bool),
    /// Correction was not `0`/`1`; the review is dropped.
    Rejected,
}

impl ReviewOutcome {
    /// Label to persist, if any.
    pub fn label(self) -> Option<bool> {
        match self {
            Self::Accepted(label) | Self::Corrected(label) => Some(label),
            Self::Rejected => None,
        }
    }
}

impl ReviewState {
    /// Apply `event`. Events that do not fit the current state leave it unchanged.
    pub fn advance(self, event: ReviewEvent<'_>) -> Self {
        match (self, event) {
            (Self::Predicting, ReviewEvent::Predicted(predicted)) => {
                Self::AwaitingConfirmation { predicted }
            }
            (Self::AwaitingConfirmation { predicted }, ReviewEvent::Answer(answer)) => {
                if is_affirmative(answer) {
                    Self::Done(ReviewOutcome::Accepted(predicted))
                } else {
                    Self::AwaitingCorrection
                }
            }
            (Self::AwaitingCorrection, ReviewEvent::Answer(answer)) => {
                match parse_correction(answer) {
                    Ok(label) => Self::Done(ReviewOutcome::Corrected(label)),
                    Err(_) => Self::Done(ReviewOutcome::Rejected),
                }
            }
            (state, _) => state,
        }
    }
}

/// Counts from one Classify-New-Reviews run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifySummary {
    /// Staged reviews examined (blank lines excluded).
    pub processed: usize,
    /// Reviews appended to the training dataset.
    pub appended: usize,
    /// Reviews skipped because their text was already in the training dataset.
    pub duplicates: usize,
    /// Reviews dropped after an invalid correction.
    pub rejected: usize,
    /// Reviews whose append failed.
    pub failed: usize,
    /// Whether the model was rebuilt at the end.
    pub retrained: bool,
}

/// Walk the staging file, confirm or correct each prediction with the
/// operator, append the results to the training dataset, clear the staging
/// file and rebuild the model.
///
/// Every staged review is consumed exactly once. Append failures are reported
/// and the batch carries on. Without a persisted model the mode does nothing.
pub fn classify_new_reviews<L, R, W>(
    lifecycle: &L,
    training_path: &Path,
    staging_path: &Path,
    console: &mut Console<R, W>,
) -> Result<ClassifySummary, SessionError>
where
    L: ModelLifecycle,
    R: BufRead,
    W: Write,
{
    let Some(model) = load_model(lifecycle, console)? else {
        console.say("The model was not found. Please train a model first.")?;
        return Ok(ClassifySummary::default());
    };

    let staged = records::load_staging_reviews(staging_path)?;
    let mut existing = records::existing_texts(training_path)?;
    let mut summary = ClassifySummary::default();

    for raw in &staged {
        let record = ReviewRecord::unlabeled(raw);
        if record.text.is_empty() {
            continue;
        }
        summary.processed += 1;
        if existing.contains(&record.text) {
            tracing::info!("Skipping known review {:?}", record.text);
            console.say(format!(
                "The review '{}' already exists in the training data and will be ignored.",
                record.text
            ))?;
            summary.duplicates += 1;
            continue;
        }

        let outcome = review_one(&model, &record.text, console)?;
        let Some(label) = outcome.label() else {
            tracing::info!("Dropped review {:?} after invalid correction", record.text);
            summary.rejected += 1;
            continue;
        };
        match records::append_training_record(training_path, &record.text, label) {
            Ok(()) => {
                existing.insert(record.text);
                summary.appended += 1;
            }
            Err(err) => {
                tracing::warn!("Failed to append review: {err}");
                console.say(format!("Error updating training data: {err}"))?;
                summary.failed += 1;
            }
        }
    }

    if let Err(err) = records::overwrite_staging_reviews::<&str>(staging_path, &[]) {
        tracing::warn!("Failed to clear staging file: {err}");
        console.say(format!("Error clearing new reviews: {err}"))?;
    }

    // Rebuilds even when nothing was appended.
    lifecycle.retrain()?;
    summary.retrained = true;
    tracing::info!(
        "Classify session done: {} appended, {} duplicates, {} rejected, {} failed",
        summary.appended,
        summary.duplicates,
        summary.rejected,
        summary.failed
    );
    Ok(summary)
}

fn review_one<M, R, W>(
    model: &M,
    text: &str,
    console: &mut Console<R, W>,
) -> Result<ReviewOutcome, SessionError>
where
    M: SentimentModel,
    R: BufRead,
    W: Write,
{
    let mut state = ReviewState::Predicting;
    loop {
        state = match state {
            ReviewState::Predicting => {
                let predicted = model.predict(text);
                console.say(format!(
                    "The classification for the review '{text}' is: {}",
                    sentiment_name(predicted)
                ))?;
                state.advance(ReviewEvent::Predicted(predicted))
            }
            ReviewState::AwaitingConfirmation { .. } => {
                let answer = console.ask(CONFIRM_PROMPT)?.unwrap_or_default();
                state.advance(ReviewEvent::Answer(&answer))
            }
            ReviewState::AwaitingCorrection => {
                let answer = console.ask(CORRECTION_PROMPT)?.unwrap_or_default();
                let next = state.advance(ReviewEvent::Answer(&answer));
                if next == ReviewState::Done(ReviewOutcome::Rejected) {
                    console.say(InvalidInput::CorrectionLabel(answer))?;
                }
                next
            }
            ReviewState::Done(outcome) => return Ok(outcome),
        };
    }
}
