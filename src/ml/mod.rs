//! Machine learning backend: text featurization and a binary linear classifier.
//!
//! These pieces are assembled into a [`pipeline::SentimentPipeline`] by the
//! model lifecycle layer; nothing outside `crate::model` touches them directly.

pub mod features;
pub mod logreg;
pub mod metrics;
pub mod pipeline;
