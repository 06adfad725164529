use std::path::{Path, PathBuf};

use super::artifact::{self, InputSchema};
use super::{MlContext, ModelError, ModelLifecycle, SentimentModel};
use crate::ml::pipeline::SentimentPipeline;
use crate::records;

impl SentimentModel for SentimentPipeline {
    fn predict(&self, text: &str) -> bool {
        SentimentPipeline::predict(self, text)
    }
}

/// Fit a fresh pipeline on the whole training dataset and persist it.
///
/// There is no held-out split; every record trains. Cost grows with the
/// dataset, and this is the only place a model gets (re)built.
pub fn build_and_train(
    ctx: &MlContext,
    training_path: &Path,
    model_path: &Path,
) -> Result<SentimentPipeline, ModelError> {
    let dataset = records::load_training_dataset(training_path)?;
    let samples: Vec<(&str, bool)> = dataset
        .iter()
        .filter_map(|record| record.label.map(|label| (record.text.as_str(), label)))
        .collect();
    if samples.is_empty() {
        return Err(ModelError::EmptyDataset {
            path: training_path.to_path_buf(),
        });
    }

    let pipeline = SentimentPipeline::fit(
        samples.iter().copied(),
        ctx.featurizer(),
        ctx.train_options(),
    )
    .map_err(ModelError::Training)?;

    let cm = pipeline.evaluate(samples.iter().copied());
    tracing::info!(
        "Trained on {} records; training accuracy {:.3}, f1 {:.3}",
        cm.total(),
        cm.accuracy(),
        cm.f1()
    );

    artifact::save(&pipeline, model_path, &InputSchema::reviews())?;
    Ok(pipeline)
}

/// File-backed model lifecycle for one training dataset and one artifact path.
#[derive(Debug)]
pub struct ModelManager<'ctx> {
    ctx: &'ctx MlContext,
    training_path: PathBuf,
    model_path: PathBuf,
}

impl<'ctx> ModelManager<'ctx> {
    pub fn new(ctx: &'ctx MlContext, training_path: PathBuf, model_path: PathBuf) -> Self {
        Self {
            ctx,
            training_path,
            model_path,
        }
    }
}

impl ModelLifecycle for ModelManager<'_> {
    type Model = SentimentPipeline;

    fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn load(&self) -> Result<SentimentPipeline, ModelError> {
        artifact::load(&self.model_path)
    }

    fn retrain(&self) -> Result<SentimentPipeline, ModelError> {
        build_and_train(self.ctx, &self.training_path, &self.model_path)
    }
}
