//! Error types for spam-detection

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spam-detection operations
pub type Result<T> = std::result::Result<T, DetectionError>;

/// Spam detection error types
#[derive(Error, Debug)]
pub enum DetectionError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset could not be parsed
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Dataset contains a label other than "spam" or "ham"
    #[error("Unexpected label {label:?} on line {line} (expected \"spam\" or \"ham\")")]
    InvalidLabel { line: usize, label: String },

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Vectorizer fitted on a corpus with no usable tokens
    #[error("Empty vocabulary: the documents contain no tokens of two or more characters")]
    EmptyVocabulary,

    /// Vectorizer used before `fit`
    #[error("Vectorizer is not fitted")]
    NotFitted,

    /// Failure reported by the underlying model
    #[error("Model error: {0}")]
    Model(String),

    /// Artifact file does not exist
    #[error("Model artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),

    /// Artifact exists but cannot be used
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for DetectionError {
    fn from(err: config::ConfigError) -> Self {
        DetectionError::Config(err.to_string())
    }
}

impl From<csv::Error> for DetectionError {
    fn from(err: csv::Error) -> Self {
        DetectionError::Dataset(err.to_string())
    }
}

impl From<smartcore::error::Failed> for DetectionError {
    fn from(err: smartcore::error::Failed) -> Self {
        DetectionError::Model(err.to_string())
    }
}

impl DetectionError {
    /// Whether the error was caused by the caller's input rather than the system
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DetectionError::InvalidInput(_) | DetectionError::InvalidLabel { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation() {
        assert!(DetectionError::InvalidInput("empty".to_string()).is_validation());
        assert!(DetectionError::InvalidLabel {
            line: 3,
            label: "junk".to_string()
        }
        .is_validation());

        assert!(!DetectionError::ArtifactNotFound(PathBuf::from("model.json")).is_validation());
        assert!(!DetectionError::InvalidArtifact("bad".to_string()).is_validation());
        assert!(!DetectionError::Model("failed".to_string()).is_validation());
    }
}
