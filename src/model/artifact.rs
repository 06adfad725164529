use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::ModelError;
use crate::ml::pipeline::SentimentPipeline;

/// Version of the on-disk envelope around the pipeline.
pub const ARTIFACT_FORMAT_VERSION: i64 = 1;

/// Column type in the training data the model was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// Input schema stored alongside the fitted pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    pub columns: Vec<SchemaColumn>,
}

impl InputSchema {
    /// `ReviewText: text`, `Label: boolean`.
    pub fn reviews() -> Self {
        Self {
            columns: vec![
                SchemaColumn {
                    name: "ReviewText".to_string(),
                    kind: ColumnKind::Text,
                },
                SchemaColumn {
                    name: "Label".to_string(),
                    kind: ColumnKind::Boolean,
                },
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    format_version: i64,
    schema: InputSchema,
    pipeline: SentimentPipeline,
}

/// Persist `pipeline` with its input schema, replacing any file at `path`.
///
/// The JSON is written to a temp file next to `path` and moved into place.
pub fn save(
    pipeline: &SentimentPipeline,
    path: &Path,
    schema: &InputSchema,
) -> Result<(), ModelError> {
    let write_err = |source: std::io::Error| ModelError::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let file = ModelFile {
        format_version: ARTIFACT_FORMAT_VERSION,
        schema: schema.clone(),
        pipeline: pipeline.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&file).map_err(ModelError::Serialize)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;
    tracing::info!("Model saved to {}", path.display());
    Ok(())
}

/// Load a pipeline saved by [`save`].
pub fn load(path: &Path) -> Result<SentimentPipeline, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ModelFile = serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if file.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ModelError::Incompatible(format!(
            "format_version {} (expected {})",
            file.format_version, ARTIFACT_FORMAT_VERSION
        )));
    }
    if file.schema != InputSchema::reviews() {
        return Err(ModelError::Incompatible(
            "input schema does not match ReviewText/Label".to_string(),
        ));
    }
    file.pipeline.validate().map_err(ModelError::Incompatible)?;
    tracing::info!("Model loaded from {}", path.display());
    Ok(file.pipeline)
}
