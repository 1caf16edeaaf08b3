//! spam-api - HTTP server for SMS spam classification
//!
//! Reads `API_*` and `SPAM_*` environment variables, then serves the model
//! artifact produced by `spam-detection train`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

use spam_api::{ApiConfig, ApiServer};
use spam_detection::{DetectionConfig, Logging, SpamDetector};

#[tokio::main]
async fn main() -> Result<()> {
    let api_config = ApiConfig::from_env().context("Failed to load API configuration")?;
    let detection_config =
        DetectionConfig::from_env().context("Failed to load detection configuration")?;

    // Initialize logging
    let logging = Logging::init(&api_config.log_settings())?;

    let model_path = detection_config.model_path();
    if !model_path.exists() {
        warn!(
            "No model artifact at {} yet; /predict will fail until one is trained",
            model_path.display()
        );
    }

    let detector = SpamDetector::new(model_path, detection_config.load_policy());
    info!(
        "Classifier ready (artifact {}, policy {:?})",
        detector.model_path().display(),
        detector.policy()
    );

    let server = ApiServer::new(api_config, Arc::new(detector));
    server.run().instrument(logging.component("api")).await?;

    Ok(())
}
