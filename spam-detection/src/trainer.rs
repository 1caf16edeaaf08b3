//! Training job
//!
//! One-shot batch: prepare the data, fit the classifier, evaluate it on the
//! held-out split and persist the artifact.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::artifact::{LabelDecoder, ModelArtifact};
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::logging::Logging;
use crate::metrics::EvaluationMetrics;
use crate::model::SpamModel;
use crate::pipeline::prepare_training_matrices_from;

/// Outcome of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub model_path: PathBuf,
    pub metrics: EvaluationMetrics,
    pub vocabulary_size: usize,
    pub train_size: usize,
    pub test_size: usize,
}

/// Spam model trainer
pub struct Trainer {
    config: DetectionConfig,
    logging: Logging,
}

impl Trainer {
    pub fn new(config: DetectionConfig, logging: Logging) -> Self {
        Self { config, logging }
    }

    /// Train on the configured dataset and save to the configured model path
    pub fn train_and_save(&self) -> Result<TrainingReport> {
        self.run(&self.config.model_path())
    }

    /// Train on the configured dataset and save the artifact to `model_path`
    pub fn run(&self, model_path: &Path) -> Result<TrainingReport> {
        self.run_on(&self.config.dataset_path(), model_path)
    }

    /// Train on `data_path` and save the artifact to `model_path`
    pub fn run_on(&self, data_path: &Path, model_path: &Path) -> Result<TrainingReport> {
        let _span = self.logging.component("trainer").entered();

        info!("Training pipeline started");
        info!("Step 1/6 - Loading and preparing data");
        let prepared = prepare_training_matrices_from(data_path, &self.config)?;
        info!(
            "Data ready: x_train={}x{} x_test={}x{} y_train={} y_test={}",
            prepared.x_train.n_rows(),
            prepared.x_train.n_features(),
            prepared.x_test.n_rows(),
            prepared.x_test.n_features(),
            prepared.y_train.len(),
            prepared.y_test.len()
        );

        info!(
            "Step 2/6 - Configuring MultinomialNB (alpha={:.3})",
            self.config.nb_alpha
        );
        info!("Step 3/6 - Fitting the model");
        let model = SpamModel::fit(&prepared.x_train, &prepared.y_train, self.config.nb_alpha)?;
        info!("Model fitted");

        info!("Step 4/6 - Predicting the test split");
        let y_pred = model.predict(&prepared.x_test)?;

        info!("Step 5/6 - Computing evaluation metrics");
        let metrics = EvaluationMetrics::evaluate(&prepared.y_test, &y_pred);

        let report = TrainingReport {
            model_path: model_path.to_path_buf(),
            metrics,
            vocabulary_size: prepared.vectorizer.n_features(),
            train_size: prepared.y_train.len(),
            test_size: prepared.y_test.len(),
        };

        let artifact = ModelArtifact {
            model,
            vectorizer: prepared.vectorizer,
            label_decoder: LabelDecoder::default(),
            metrics: Some(metrics),
        };

        info!("Step 6/6 - Saving the model artifact");
        let saved = artifact.save(model_path)?;

        info!(
            "Metrics -> accuracy={:.4} precision={:.4} recall={:.4} f1={:.4}",
            metrics.accuracy, metrics.precision, metrics.recall, metrics.f1
        );
        info!("Model saved: {}", saved.display());
        info!("Training pipeline finished");

        Ok(report)
    }
}
