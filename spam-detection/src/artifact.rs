//! Persisted model bundle
//!
//! The artifact is a JSON object with the keys `model`, `vectorizer`,
//! `label_decoder` and `metrics`. Only `model` and `vectorizer` are required
//! when loading.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dataset::Label;
use crate::error::{DetectionError, Result};
use crate::metrics::EvaluationMetrics;
use crate::model::SpamModel;
use crate::vectorizer::CountVectorizer;

/// Label returned for class ids missing from the decoder
pub const UNKNOWN_LABEL: &str = "unknown";

/// Class id → label string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelDecoder(BTreeMap<u32, String>);

impl LabelDecoder {
    pub fn new(entries: BTreeMap<u32, String>) -> Self {
        Self(entries)
    }

    /// Label for a class id, or [`UNKNOWN_LABEL`]
    pub fn decode(&self, class_id: u32) -> &str {
        self.0.get(&class_id).map(String::as_str).unwrap_or(UNKNOWN_LABEL)
    }
}

impl Default for LabelDecoder {
    fn default() -> Self {
        Self(
            [Label::Ham, Label::Spam]
                .into_iter()
                .map(|label| (label.class_id(), label.as_str().to_string()))
                .collect(),
        )
    }
}

/// Everything inference needs, written once by the trainer
#[derive(Debug, Serialize)]
pub struct ModelArtifact {
    pub model: SpamModel,
    pub vectorizer: CountVectorizer,
    pub label_decoder: LabelDecoder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<EvaluationMetrics>,
}

impl ModelArtifact {
    /// Write the artifact as JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;

        Ok(path.to_path_buf())
    }

    /// Read and validate an artifact
    ///
    /// A missing file yields [`DetectionError::ArtifactNotFound`]; a file that
    /// lacks the model or the vectorizer, or cannot be decoded, yields
    /// [`DetectionError::InvalidArtifact`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DetectionError::ArtifactNotFound(path.to_path_buf()));
        }

        let reader = BufReader::new(File::open(path)?);
        let value: Value = serde_json::from_reader(reader).map_err(|e| {
            DetectionError::InvalidArtifact(format!("{} is not valid JSON: {}", path.display(), e))
        })?;

        Self::from_value(value)
    }

    /// Decode an artifact from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(DetectionError::InvalidArtifact(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let (model, vectorizer) = match (fields.remove("model"), fields.remove("vectorizer")) {
            (Some(model), Some(vectorizer)) => (model, vectorizer),
            _ => {
                return Err(DetectionError::InvalidArtifact(
                    "missing the model or the vectorizer".to_string(),
                ))
            }
        };

        let model: SpamModel = decode_field("model", model)?;
        let vectorizer: CountVectorizer = decode_field("vectorizer", vectorizer)?;
        vectorizer.validate()?;
        if !vectorizer.is_fitted() {
            return Err(DetectionError::InvalidArtifact(
                "vectorizer has an empty vocabulary".to_string(),
            ));
        }
        if model.n_features() != vectorizer.n_features() {
            return Err(DetectionError::InvalidArtifact(format!(
                "model expects {} features but the vectorizer produces {}",
                model.n_features(),
                vectorizer.n_features()
            )));
        }

        let label_decoder = optional_field(&mut fields, "label_decoder")?.unwrap_or_default();
        let metrics = optional_field(&mut fields, "metrics")?;

        Ok(Self {
            model,
            vectorizer,
            label_decoder,
            metrics,
        })
    }
}

fn decode_field<T: serde::de::DeserializeOwned>(name: &str, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| DetectionError::InvalidArtifact(format!("bad `{}` entry: {}", name, e)))
}

fn optional_field<T: serde::de::DeserializeOwned>(
    fields: &mut Map<String, Value>,
    name: &str,
) -> Result<Option<T>> {
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_field(name, value).map(Some),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
