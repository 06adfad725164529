use std::cell::Cell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use sentirev::model::{ModelError, ModelLifecycle, SentimentModel};

type PredictHook = Rc<dyn Fn(&str)>;

/// Positive when the text mentions "good" or "great".
#[derive(Clone, Default)]
pub struct KeywordModel {
    on_predict: Option<PredictHook>,
}

impl fmt::Debug for KeywordModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordModel")
            .field("hooked", &self.on_predict.is_some())
            .finish()
    }
}

impl SentimentModel for KeywordModel {
    fn predict(&self, text: &str) -> bool {
        if let Some(hook) = &self.on_predict {
            hook(text);
        }
        let lowered = text.to_lowercase();
        lowered.contains("good") || lowered.contains("great")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Artifact {
    Missing,
    Usable,
    Unusable,
}

/// In-memory lifecycle that counts loads and retrains.
#[derive(Debug)]
pub struct FakeLifecycle {
    model_path: PathBuf,
    artifact: Cell<Artifact>,
    model: KeywordModel,
    pub loads: Cell<usize>,
    pub retrains: Cell<usize>,
}

impl FakeLifecycle {
    pub fn with_model(dir: &Path) -> Self {
        Self::new(dir, Artifact::Usable)
    }

    pub fn without_model(dir: &Path) -> Self {
        Self::new(dir, Artifact::Missing)
    }

    /// An artifact exists on disk but fails to load as incompatible.
    pub fn with_unusable_model(dir: &Path) -> Self {
        Self::new(dir, Artifact::Unusable)
    }

    /// Run `hook` with each text before the model predicts it.
    pub fn on_predict(mut self, hook: impl Fn(&str) + 'static) -> Self {
        self.model.on_predict = Some(Rc::new(hook));
        self
    }

    fn new(dir: &Path, artifact: Artifact) -> Self {
        Self {
            model_path: dir.join("model.json"),
            artifact: Cell::new(artifact),
            model: KeywordModel::default(),
            loads: Cell::new(0),
            retrains: Cell::new(0),
        }
    }
}

impl ModelLifecycle for FakeLifecycle {
    type Model = KeywordModel;

    fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn model_exists(&self) -> bool {
        self.artifact.get() != Artifact::Missing
    }

    fn load(&self) -> Result<KeywordModel, ModelError> {
        self.loads.set(self.loads.get() + 1);
        match self.artifact.get() {
            Artifact::Usable => Ok(self.model.clone()),
            Artifact::Unusable => Err(ModelError::Incompatible(
                "format_version 0 (expected 1)".to_string(),
            )),
            Artifact::Missing => Err(ModelError::NotFound {
                path: self.model_path.clone(),
            }),
        }
    }

    fn retrain(&self) -> Result<KeywordModel, ModelError> {
        self.retrains.set(self.retrains.get() + 1);
        self.artifact.set(Artifact::Usable);
        Ok(self.model.clone())
    }
}
