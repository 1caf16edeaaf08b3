//! Command line entry point for training and one-off predictions
//!
//! # Usage
//!
//! ```bash
//! # Train on the configured dataset and save the artifact
//! spam-detection train
//!
//! # Train with overrides
//! spam-detection train --data data/sms.tsv --model model/nb.json --alpha 0.5
//!
//! # Classify a message
//! spam-detection predict "WIN a free prize now!"
//!
//! # Show the metrics stored with the artifact
//! spam-detection metrics
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use spam_detection::inference::Classifier;
use spam_detection::{DetectionConfig, LoadPolicy, Logging, ModelArtifact, SpamDetector, Trainer};

#[derive(Parser)]
#[command(name = "spam-detection")]
#[command(about = "Train and query the SMS spam classifier", long_about = None)]
struct Cli {
    /// Optional TOML configuration file (SPAM_* variables still override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model and save the artifact
    Train {
        /// Labeled dataset (tab separated: label, message)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Output artifact path
        #[arg(long)]
        model: Option<PathBuf>,
        /// Naive Bayes smoothing
        #[arg(long)]
        alpha: Option<f64>,
        /// Held-out fraction
        #[arg(long)]
        test_size: Option<f64>,
        /// Split seed
        #[arg(long)]
        seed: Option<u64>,
        /// Vocabulary size cap
        #[arg(long)]
        max_features: Option<usize>,
    },
    /// Classify a text
    Predict {
        /// Artifact path
        #[arg(long)]
        model: Option<PathBuf>,
        /// Text to classify
        text: String,
    },
    /// Print the evaluation metrics stored in an artifact
    Metrics {
        /// Artifact path
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        DetectionConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Train {
            data,
            model,
            alpha,
            test_size,
            seed,
            max_features,
        } => {
            if let Some(alpha) = alpha {
                config.nb_alpha = alpha;
            }
            if let Some(test_size) = test_size {
                config.test_size = test_size;
            }
            if let Some(seed) = seed {
                config.random_state = seed;
            }
            if max_features.is_some() {
                config.max_features = max_features;
            }
            config.validate()?;
            config.ensure_dirs()?;

            let logging = Logging::init(&config.log_settings("spam_detection=info"))?;
            let data_path = data.unwrap_or_else(|| config.dataset_path());
            let model_path = model.unwrap_or_else(|| config.model_path());

            let report = Trainer::new(config, logging)
                .run_on(&data_path, &model_path)
                .with_context(|| format!("Training failed on {}", data_path.display()))?;

            println!("✓ Model saved to {}", report.model_path.display());
            println!(
                "  train={} test={} vocabulary={}",
                report.train_size, report.test_size, report.vocabulary_size
            );
            print_metrics(&report.metrics);
        }
        Commands::Predict { model, text } => {
            let model_path = model.unwrap_or_else(|| config.model_path());
            let detector = SpamDetector::new(model_path, LoadPolicy::PerRequest);
            let prediction = detector.predict(&text)?;
            println!("{} ({})", prediction.label, prediction.class_id);
        }
        Commands::Metrics { model } => {
            let model_path = model.unwrap_or_else(|| config.model_path());
            let artifact = ModelArtifact::load(&model_path)?;
            match artifact.metrics {
                Some(metrics) => print_metrics(&metrics),
                None => {
                    eprintln!("Error: {} carries no metrics", model_path.display());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_metrics(metrics: &spam_detection::EvaluationMetrics) {
    println!("{:<10} {:>8}", "Metric", "Value");
    println!("{:-<19}", "");
    println!("{:<10} {:>8.4}", "accuracy", metrics.accuracy);
    println!("{:<10} {:>8.4}", "precision", metrics.precision);
    println!("{:<10} {:>8.4}", "recall", metrics.recall);
    println!("{:<10} {:>8.4}", "f1", metrics.f1);
}
