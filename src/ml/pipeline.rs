//! Fitted two-stage pipeline: text featurizer followed by the binary classifier.

use serde::{Deserialize, Serialize};

use super::features::TextFeaturizer;
use super::logreg::{BinaryLogReg, TrainDataset, TrainOptions, train_logreg};
use super::metrics::BinaryConfusion;

/// Current pipeline layout version.
pub const PIPELINE_VERSION: i64 = 1;

/// Serializable fitted pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPipeline {
    pub pipeline_version: i64,
    pub featurizer: TextFeaturizer,
    pub classifier: BinaryLogReg,
}

impl SentimentPipeline {
    /// Featurize every `(text, label)` sample and fit the classifier on all of them.
    pub fn fit<'a, I>(
        samples: I,
        featurizer: TextFeaturizer,
        options: &TrainOptions,
    ) -> Result<Self, String>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        featurizer.validate()?;
        let mut dataset = TrainDataset {
            dim: featurizer.dimensions,
            x: Vec::new(),
            y: Vec::new(),
        };
        for (text, label) in samples {
            dataset.x.push(featurizer.transform(text));
            dataset.y.push(label);
        }
        let classifier = train_logreg(&dataset, options)?;
        Ok(Self {
            pipeline_version: PIPELINE_VERSION,
            featurizer,
            classifier,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pipeline_version != PIPELINE_VERSION {
            return Err(format!(
                "Unsupported pipeline_version {} (expected {})",
                self.pipeline_version, PIPELINE_VERSION
            ));
        }
        self.featurizer.validate()?;
        self.classifier.validate()?;
        if self.classifier.dim != self.featurizer.dimensions {
            return Err("classifier and featurizer dimensions differ".to_string());
        }
        Ok(())
    }

    pub fn predict(&self, text: &str) -> bool {
        self.classifier.predict(&self.featurizer.transform(text))
    }

    /// Score the pipeline against labeled samples.
    pub fn evaluate<'a, I>(&self, samples: I) -> BinaryConfusion
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut cm = BinaryConfusion::default();
        for (text, label) in samples {
            cm.add(label, self.predict(text));
        }
        cm
    }
}
