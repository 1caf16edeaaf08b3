//! spam-detection: SMS spam classifier
//!
//! Bag-of-words Multinomial Naive Bayes over cleaned SMS text, with a batch
//! trainer and an inference service backed by a persisted JSON artifact.
//!
//! # Features
//!
//! - **Cleaning**: lowercase, ASCII alphanumerics only, collapsed whitespace
//! - **Features**: token counts over a vocabulary learned on the training split
//! - **Model**: Multinomial Naive Bayes with additive smoothing (smartcore)
//! - **Evaluation**: accuracy, precision, recall and F1 on a stratified hold-out
//! - **Inference**: cached or per-request artifact loading behind [`Classifier`]
//!
//! # Example
//!
//! ```no_run
//! use spam_detection::{DetectionConfig, Logging, SpamDetector, Trainer};
//! use spam_detection::inference::Classifier;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DetectionConfig::from_env()?;
//!     let logging = Logging::init(&config.log_settings("spam_detection=info"))?;
//!
//!     let report = Trainer::new(config.clone(), logging).train_and_save()?;
//!     println!("f1 = {:.3}", report.metrics.f1);
//!
//!     let detector = SpamDetector::new(config.model_path(), config.load_policy());
//!     let prediction = detector.predict("WIN a free prize now!")?;
//!     println!("{}", prediction.label);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`text`]: Text normalization
//! - [`dataset`]: Labeled dataset loading
//! - [`vectorizer`]: Count vectorizer
//! - [`trainer`]: Training job
//! - [`inference`]: Prediction service

pub mod artifact;
pub mod config;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod split;
pub mod text;
pub mod trainer;
pub mod vectorizer;

// Re-export commonly used types
pub use artifact::ModelArtifact;
pub use config::DetectionConfig;
pub use error::{DetectionError, Result};
pub use inference::{Classifier, LoadPolicy, Prediction, SpamDetector};
pub use logging::{LogSettings, Logging};
pub use metrics::EvaluationMetrics;
pub use trainer::{Trainer, TrainingReport};
