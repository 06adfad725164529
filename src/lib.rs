//! Review sentiment classifier with an operator-in-the-loop labeling workflow.
//!
//! Reviews are classified by a hashed n-gram + logistic regression pipeline
//! trained from a tab-separated dataset. Operators either type new reviews
//! (which are classified and staged) or walk staged reviews, confirm or
//! correct each label, and grow the dataset the model is rebuilt from.

/// Entry point flow.
pub mod app;
/// Application directory helpers.
pub mod app_dirs;
/// Settings file.
pub mod config;
/// Tracing setup.
pub mod logging;
/// Featurizer, classifier and fitted pipeline.
pub mod ml;
/// Model build/persist/load.
pub mod model;
/// Training dataset and staging file I/O.
pub mod records;
/// Interactive operator sessions.
pub mod session;
