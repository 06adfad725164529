//! Model lifecycle: build, train, persist and reload the sentiment pipeline.
//!
//! Session code only sees the [`SentimentModel`] and [`ModelLifecycle`]
//! traits. The concrete backend is [`ModelManager`], which fits a
//! [`SentimentPipeline`](crate::ml::pipeline::SentimentPipeline) using the
//! settings carried by an explicitly constructed [`MlContext`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::records::RecordError;

mod artifact;
mod context;
mod lifecycle;

pub use artifact::{ARTIFACT_FORMAT_VERSION, ColumnKind, InputSchema, SchemaColumn, load, save};
pub use context::MlContext;
pub use lifecycle::{ModelManager, build_and_train};

/// A fitted classifier that maps review text to a sentiment label.
pub trait SentimentModel {
    /// `true` for positive. Same text, same artifact, same answer.
    fn predict(&self, text: &str) -> bool;
}

/// Access to the single live model artifact.
pub trait ModelLifecycle {
    type Model: SentimentModel;

    /// Where the artifact lives.
    fn model_path(&self) -> &Path;

    /// Whether an artifact is currently persisted.
    fn model_exists(&self) -> bool {
        self.model_path().exists()
    }

    /// Load the persisted artifact; [`ModelError::NotFound`] when absent.
    fn load(&self) -> Result<Self::Model, ModelError>;

    /// Rebuild from the full training dataset and persist, replacing the
    /// previous artifact.
    fn retrain(&self) -> Result<Self::Model, ModelError>;
}

/// Errors raised while building, saving or loading a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("The model was not found at {path}")]
    NotFound { path: PathBuf },
    #[error(transparent)]
    Records(#[from] RecordError),
    #[error("No training records in {path}")]
    EmptyDataset { path: PathBuf },
    #[error("Training failed: {0}")]
    Training(String),
    #[error("Failed to read model {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write model {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize model: {0}")]
    Serialize(serde_json::Error),
    #[error("Invalid model file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Incompatible model: {0}")]
    Incompatible(String),
}
