//! Settings file (`config.toml`) with the data file locations and the
//! training knobs handed to the ML context.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Default filename of the model artifact inside the app directory.
pub const MODEL_FILE_NAME: &str = "model.json";

const MIN_FEATURE_DIMENSIONS: usize = 16;
const MAX_FEATURE_DIMENSIONS: usize = 1 << 22;

/// Application settings loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub training: TrainingSettings,
    #[serde(default)]
    pub features: FeatureSettings,
}

/// Locations of the training dataset, staging file and model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_training_data")]
    pub training_data: PathBuf,
    #[serde(default = "default_new_reviews")]
    pub new_reviews: PathBuf,
    /// Model artifact path; `None` places it in the app directory.
    #[serde(default)]
    pub model: Option<PathBuf>,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            training_data: default_training_data(),
            new_reviews: default_new_reviews(),
            model: None,
        }
    }
}

/// Optimizer settings for the logistic regression stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSettings {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    #[serde(default = "default_l2")]
    pub l2: f32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Weight the loss so both labels contribute equally.
    #[serde(default = "default_true")]
    pub balance_classes: bool,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            learning_rate: default_learning_rate(),
            l2: default_l2(),
            batch_size: default_batch_size(),
            seed: default_seed(),
            balance_classes: true,
        }
    }
}

/// Text featurizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSettings {
    /// Number of hash buckets.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Largest word n-gram emitted (1 = unigrams only).
    #[serde(default = "default_word_ngrams")]
    pub word_ngrams: usize,
    /// Character n-gram length (0 disables character features).
    #[serde(default = "default_char_ngrams")]
    pub char_ngrams: usize,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            word_ngrams: default_word_ngrams(),
            char_ngrams: default_char_ngrams(),
        }
    }
}

/// Resolved, absolute-or-relative file locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPaths {
    pub training_data: PathBuf,
    pub new_reviews: PathBuf,
    pub model: PathBuf,
}

/// Errors that may occur while loading app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("No suitable config directory found: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
}

/// Resolve the configuration file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    load_from(&path)
}

/// Load configuration from `path`, returning defaults if the file is absent.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(AppConfig::normalized)
}

impl AppConfig {
    /// Clamp values that would make training or featurization degenerate.
    pub fn normalized(mut self) -> Self {
        self.features.dimensions = self
            .features
            .dimensions
            .clamp(MIN_FEATURE_DIMENSIONS, MAX_FEATURE_DIMENSIONS);
        self.features.word_ngrams = self.features.word_ngrams.max(1);
        self.training.batch_size = self.training.batch_size.max(1);
        if !self.training.learning_rate.is_finite() || self.training.learning_rate <= 0.0 {
            self.training.learning_rate = default_learning_rate();
        }
        if !self.training.l2.is_finite() || self.training.l2 < 0.0 {
            self.training.l2 = 0.0;
        }
        self
    }

    /// Resolve the data and model paths for this run.
    pub fn resolve_paths(&self) -> Result<ReviewPaths, ConfigError> {
        let model = match &self.paths.model {
            Some(path) => path.clone(),
            None => app_dirs::app_root_dir()?.join(MODEL_FILE_NAME),
        };
        Ok(ReviewPaths {
            training_data: self.paths.training_data.clone(),
            new_reviews: self.paths.new_reviews.clone(),
            model,
        })
    }
}

fn default_training_data() -> PathBuf {
    PathBuf::from("TrainingData").join("Reviews.tsv")
}

fn default_new_reviews() -> PathBuf {
    PathBuf::from("TrainingData").join("NewReviews.tsv")
}

fn default_epochs() -> usize {
    40
}

fn default_learning_rate() -> f32 {
    0.5
}

fn default_l2() -> f32 {
    1e-4
}

fn default_batch_size() -> usize {
    32
}

fn default_seed() -> u64 {
    42
}

fn default_true() -> bool {
    true
}

fn default_dimensions() -> usize {
    1 << 14
}

fn default_word_ngrams() -> usize {
    2
}

fn default_char_ngrams() -> usize {
    3
}
