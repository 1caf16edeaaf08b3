//! Configuration for spam-detection
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `SPAM_*` environment variables (e.g. `SPAM_TEST_SIZE=0.2`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DetectionError, Result};
use crate::inference::LoadPolicy;
use crate::logging::LogSettings;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SPAM";

/// Training and inference configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    /// Directory holding the raw dataset
    pub data_dir: PathBuf,
    /// Dataset path relative to `data_dir`
    pub dataset_file: PathBuf,
    /// Directory receiving the model artifact
    pub model_dir: PathBuf,
    /// Artifact file name inside `model_dir`
    pub model_filename: String,
    /// Directory receiving log files
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`
    pub log_file: String,
    /// Fraction of the dataset held out for evaluation
    pub test_size: f64,
    /// Seed for the train/test split
    pub random_state: u64,
    /// Naive Bayes additive smoothing
    pub nb_alpha: f64,
    /// Optional cap on vocabulary size
    #[serde(default)]
    pub max_features: Option<usize>,
    /// Keep the loaded artifact in memory between predictions
    pub cache_artifact: bool,
}

impl DetectionConfig {
    /// Load configuration from defaults and `SPAM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration, layering an optional TOML file under the environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("data_dir", path_value(&defaults.data_dir))?
            .set_default("dataset_file", path_value(&defaults.dataset_file))?
            .set_default("model_dir", path_value(&defaults.model_dir))?
            .set_default("model_filename", defaults.model_filename)?
            .set_default("log_dir", path_value(&defaults.log_dir))?
            .set_default("log_file", defaults.log_file)?
            .set_default("test_size", defaults.test_size)?
            .set_default("random_state", defaults.random_state as i64)?
            .set_default("nb_alpha", defaults.nb_alpha)?
            .set_default("cache_artifact", defaults.cache_artifact)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(DetectionError::Config(format!(
                "test_size must be strictly between 0 and 1, got {}",
                self.test_size
            )));
        }

        if !(self.nb_alpha > 0.0) || !self.nb_alpha.is_finite() {
            return Err(DetectionError::Config(format!(
                "nb_alpha must be a positive number, got {}",
                self.nb_alpha
            )));
        }

        if self.max_features == Some(0) {
            return Err(DetectionError::Config(
                "max_features must be greater than 0 when set".to_string(),
            ));
        }

        if self.model_filename.trim().is_empty() {
            return Err(DetectionError::Config("model_filename is empty".to_string()));
        }

        Ok(())
    }

    /// Create the model and log directories
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.model_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }

    /// Path of the labeled dataset
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset_file)
    }

    /// Path of the persisted model artifact
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_filename)
    }

    /// Path of the training log file
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }

    /// How the inference service treats the artifact file
    pub fn load_policy(&self) -> LoadPolicy {
        if self.cache_artifact {
            LoadPolicy::Cached
        } else {
            LoadPolicy::PerRequest
        }
    }

    /// Logging settings for processes driven by this configuration
    pub fn log_settings(&self, default_directive: &str) -> LogSettings {
        LogSettings {
            dir: self.log_dir.clone(),
            file_name: self.log_file.clone(),
            default_directive: default_directive.to_string(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dataset_file: PathBuf::from("smsspamcollection/SMSSpamCollection"),
            model_dir: PathBuf::from("model"),
            model_filename: "naive_bayes_spam.json".to_string(),
            log_dir: PathBuf::from("logs"),
            log_file: "spam_detection.log".to_string(),
            test_size: 0.25,
            random_state: 1,
            nb_alpha: 1.0,
            max_features: None,
            cache_artifact: true,
        }
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
