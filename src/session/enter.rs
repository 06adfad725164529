use std::io::{BufRead, Write};
use std::path::Path;

use super::{Console, SessionError};
use crate::model::{ModelError, ModelLifecycle, SentimentModel};
use crate::records::{self, ReviewRecord, sentiment_name};

/// Keyword that ends review entry (case-insensitive).
pub const EXIT_KEYWORD: &str = "exit";

/// Result of one Enter-New-Reviews run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnterSummary {
    /// Reviews classified and handed to the staging file.
    pub collected: usize,
    /// Whether the staging file was written.
    pub saved: bool,
}

/// Collect reviews from the operator, classify each as it arrives, then
/// replace the staging file with everything collected.
///
/// Without a persisted model nothing is collected and no file is touched.
pub fn enter_new_reviews<L, R, W>(
    lifecycle: &L,
    staging_path: &Path,
    console: &mut Console<R, W>,
) -> Result<EnterSummary, SessionError>
where
    L: ModelLifecycle,
    R: BufRead,
    W: Write,
{
    let model = match load_model(lifecycle, console)? {
        Some(model) => model,
        None => {
            console.say("The model was not found. No classification can be performed.")?;
            return Ok(EnterSummary::default());
        }
    };

    let mut collected: Vec<ReviewRecord> = Vec::new();
    loop {
        let Some(input) = console.ask("Please enter a review (or 'exit' to finish):")? else {
            break;
        };
        if input.trim().eq_ignore_ascii_case(EXIT_KEYWORD) {
            break;
        }
        let record = ReviewRecord::unlabeled(&input);
        if record.text.is_empty() {
            continue;
        }
        let predicted = model.predict(&record.text);
        console.say(format!(
            "The classification for the review '{}' is: {}",
            record.text,
            sentiment_name(predicted)
        ))?;
        collected.push(record);
    }

    let texts: Vec<&str> = collected.iter().map(|record| record.text.as_str()).collect();
    let saved = match records::overwrite_staging_reviews(staging_path, &texts) {
        Ok(()) => {
            console.say("All new reviews have been saved.")?;
            true
        }
        Err(err) => {
            tracing::warn!("Failed to write staging file: {err}");
            console.say(format!("Error updating new reviews: {err}"))?;
            false
        }
    };
    Ok(EnterSummary {
        collected: collected.len(),
        saved,
    })
}

/// Load the live model, mapping a missing artifact to `None`.
///
/// An artifact that exists but cannot be read back (corrupt JSON, older
/// format, foreign schema) is replaced by a freshly trained model.
pub(super) fn load_model<L, R, W>(
    lifecycle: &L,
    console: &mut Console<R, W>,
) -> Result<Option<L::Model>, SessionError>
where
    L: ModelLifecycle,
    R: BufRead,
    W: Write,
{
    if !lifecycle.model_exists() {
        return Ok(None);
    }
    match lifecycle.load() {
        Ok(model) => Ok(Some(model)),
        Err(ModelError::NotFound { .. }) => Ok(None),
        Err(err @ (ModelError::Parse { .. } | ModelError::Incompatible(_))) => {
            tracing::warn!("Unusable model at {}: {err}", lifecycle.model_path().display());
            console.say(format!(
                "The saved model could not be loaded ({err}). Retraining it from the training data."
            ))?;
            Ok(Some(lifecycle.retrain()?))
        }
        Err(err) => Err(err.into()),
    }
}
