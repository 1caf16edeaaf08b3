//! Live server fixtures for end-to-end tests

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

use spam_api::{ApiConfig, ApiServer};
use spam_detection::{DetectionConfig, LoadPolicy, Logging, SpamDetector, Trainer, TrainingReport};

/// Sample dataset shared with the spam-detection tests
pub fn sample_dataset() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("spam-detection")
        .join("tests")
        .join("fixtures")
        .join("sms_sample.tsv")
}

/// A live API server backed by an artifact in a scratch directory
pub struct TestEnv {
    pub base_url: String,
    pub model_path: PathBuf,
    pub report: Option<TrainingReport>,
    _dir: tempfile::TempDir,
}

impl TestEnv {
    /// Train on the sample dataset, then serve the resulting artifact
    pub async fn trained(policy: LoadPolicy) -> Result<Self, String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let model_path = dir.path().join("model").join("naive_bayes_spam.json");

        println!("🧠 Training on {}", sample_dataset().display());
        let report = Trainer::new(DetectionConfig::default(), Logging::disabled())
            .run_on(&sample_dataset(), &model_path)
            .map_err(|e| format!("Training failed: {}", e))?;

        Self::serve(dir, model_path, policy, Some(report)).await
    }

    /// Serve a model path that was never written
    pub async fn untrained() -> Result<Self, String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let model_path = dir.path().join("missing.json");
        Self::serve(dir, model_path, LoadPolicy::Cached, None).await
    }

    async fn serve(
        dir: tempfile::TempDir,
        model_path: PathBuf,
        policy: LoadPolicy,
        report: Option<TrainingReport>,
    ) -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| format!("Failed to bind: {}", e))?;
        let addr = listener.local_addr().map_err(|e| e.to_string())?;

        let config = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
            ..ApiConfig::default()
        };
        let base_url = format!("http://{}{}", addr, config.prefix);

        let detector = SpamDetector::new(&model_path, policy);
        let server = ApiServer::new(config, Arc::new(detector));
        tokio::spawn(async move {
            if let Err(e) = server.serve(listener).await {
                eprintln!("❌ API server stopped: {}", e);
            }
        });

        let env = Self {
            base_url,
            model_path,
            report,
            _dir: dir,
        };
        env.wait_for_service(10).await?;
        Ok(env)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Wait for the health endpoint to answer
    pub async fn wait_for_service(&self, timeout_secs: u64) -> Result<(), String> {
        let client = reqwest::Client::new();
        let start = std::time::Instant::now();
        let url = self.url("/health");

        loop {
            if start.elapsed().as_secs() > timeout_secs {
                return Err(format!("Timeout waiting for service: {}", url));
            }

            match client.get(&url).send().await {
                Ok(_) => return Ok(()),
                Err(_) => {
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}
