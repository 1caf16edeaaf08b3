//! spam-api: HTTP front end for the SMS spam classifier
//!
//! Exposes `GET {prefix}/health` and `POST {prefix}/predict` over axum. The
//! classifier is built once at startup and injected into the router state.
//!
//! # Example
//!
//! ```no_run
//! use spam_api::{ApiConfig, ApiServer};
//! use spam_detection::{DetectionConfig, SpamDetector};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let detection = DetectionConfig::from_env()?;
//!     let detector = SpamDetector::new(detection.model_path(), detection.load_policy());
//!
//!     let server = ApiServer::new(ApiConfig::from_env()?, Arc::new(detector));
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use server::{router, ApiServer};
