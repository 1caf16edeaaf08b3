//! Inference service
//!
//! [`SpamDetector`] loads the persisted artifact and classifies single texts.
//! It is built once per process and shared behind the [`Classifier`] trait.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::artifact::ModelArtifact;
use crate::error::{DetectionError, Result};
use crate::pipeline::vectorize_input_text;

/// Class id and label for one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub class_id: u32,
    pub label: String,
}

/// Text classifier abstraction
pub trait Classifier: Send + Sync {
    /// Classify a raw (uncleaned) text
    fn predict(&self, text: &str) -> Result<Prediction>;
}

/// When the artifact file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Read on first use and keep in memory; a failed read is retried next call
    #[default]
    Cached,
    /// Read from disk on every prediction
    PerRequest,
}

/// Load and validate an artifact file
pub fn load_inference_artifact(model_path: &Path) -> Result<ModelArtifact> {
    ModelArtifact::load(model_path)
}

/// Artifact-backed spam classifier
pub struct SpamDetector {
    model_path: PathBuf,
    policy: LoadPolicy,
    cached: RwLock<Option<Arc<ModelArtifact>>>,
}

impl SpamDetector {
    /// Create a detector; the artifact is not read until the first prediction
    pub fn new(model_path: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            model_path: model_path.into(),
            policy,
            cached: RwLock::new(None),
        }
    }

    /// Create a detector around an artifact already in memory
    pub fn from_artifact(model_path: impl Into<PathBuf>, artifact: ModelArtifact) -> Self {
        Self {
            model_path: model_path.into(),
            policy: LoadPolicy::Cached,
            cached: RwLock::new(Some(Arc::new(artifact))),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Drop the cached artifact so the next prediction reads the file again
    pub fn reload(&self) {
        if let Ok(mut cached) = self.cached.write() {
            *cached = None;
        }
        info!("Model artifact cache cleared for {}", self.model_path.display());
    }

    /// Artifact for the next prediction, according to the load policy
    pub fn artifact(&self) -> Result<Arc<ModelArtifact>> {
        if self.policy == LoadPolicy::PerRequest {
            return Ok(Arc::new(load_inference_artifact(&self.model_path)?));
        }

        if let Some(artifact) = self.cached.read().ok().and_then(|c| c.clone()) {
            return Ok(artifact);
        }

        let mut cached = self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(artifact) = cached.as_ref() {
            return Ok(artifact.clone());
        }

        let artifact = Arc::new(load_inference_artifact(&self.model_path)?);
        info!("Model artifact loaded from {}", self.model_path.display());
        *cached = Some(artifact.clone());
        Ok(artifact)
    }

    /// Predicted class id (0 = ham, 1 = spam)
    pub fn predict_text(&self, text: &str) -> Result<u32> {
        let artifact = self.artifact()?;
        classify(&artifact, text)
    }

    /// Predicted label string, "unknown" for ids the decoder does not know
    pub fn predict_label(&self, text: &str) -> Result<String> {
        let artifact = self.artifact()?;
        let class_id = classify(&artifact, text)?;
        Ok(artifact.label_decoder.decode(class_id).to_string())
    }
}

impl Classifier for SpamDetector {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let artifact = self.artifact()?;
        let class_id = classify(&artifact, text)?;
        let label = artifact.label_decoder.decode(class_id).to_string();
        debug!(class_id, label = %label, "Prediction computed");
        Ok(Prediction { class_id, label })
    }
}

fn classify(artifact: &ModelArtifact, text: &str) -> Result<u32> {
    let features = vectorize_input_text(text, &artifact.vectorizer)?;
    let predictions = artifact.model.predict(&features)?;
    predictions
        .first()
        .copied()
        .ok_or_else(|| DetectionError::Model("model returned no prediction".to_string()))
}
