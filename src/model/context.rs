use crate::config::AppConfig;
use crate::ml::features::TextFeaturizer;
use crate::ml::logreg::TrainOptions;

/// Settings shared by every fit in a run.
///
/// Built once at startup from the app config and passed by reference to
/// whatever needs to train; nothing is held process-wide.
#[derive(Debug, Clone)]
pub struct MlContext {
    featurizer: TextFeaturizer,
    train_options: TrainOptions,
}

impl MlContext {
    pub fn new(featurizer: TextFeaturizer, train_options: TrainOptions) -> Self {
        Self {
            featurizer,
            train_options,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let features = &config.features;
        let training = &config.training;
        Self::new(
            TextFeaturizer::new(features.dimensions, features.word_ngrams, features.char_ngrams),
            TrainOptions {
                epochs: training.epochs,
                learning_rate: training.learning_rate,
                l2: training.l2,
                batch_size: training.batch_size,
                seed: training.seed,
                balance_classes: training.balance_classes,
            },
        )
    }

    /// Fresh, unfitted featurizer for a new pipeline.
    pub fn featurizer(&self) -> TextFeaturizer {
        self.featurizer.clone()
    }

    pub fn train_options(&self) -> &TrainOptions {
        &self.train_options
    }
}

impl Default for MlContext {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_mirrors_config_values() {
        let mut config = AppConfig::default();
        config.training.epochs = 7;
        config.training.seed = 9;
        config.features.dimensions = 256;
        let ctx = MlContext::from_config(&config);
        assert_eq!(ctx.train_options().epochs, 7);
        assert_eq!(ctx.train_options().seed, 9);
        assert_eq!(ctx.featurizer().dimensions, 256);
    }
}
