//! HTTP server configuration
//!
//! Built from defaults, an optional TOML file and `API_*` environment
//! variables (e.g. `API_PORT=9000`). Empty variables are ignored, except
//! `API_PREFIX=""` which selects the root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use spam_detection::LogSettings;

use crate::error::{ApiError, Result};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "API";

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Listen host
    pub host: String,
    /// Listen port (0 picks a free port)
    pub port: u16,
    /// Route prefix, e.g. "/api/v1"; empty serves from the root
    pub prefix: String,
    /// Directory receiving log files
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`
    pub log_file: String,
}

impl ApiConfig {
    /// Load configuration from defaults and `API_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration, layering an optional TOML file under the environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("prefix", defaults.prefix)?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .set_default("log_file", defaults.log_file)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        // An empty prefix is meaningful, so it bypasses ignore_empty
        let explicit_prefix = std::env::var(format!("{}_PREFIX", ENV_PREFIX)).ok();

        let mut config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .ignore_empty(true),
            )
            .set_override_option("prefix", explicit_prefix)?
            .build()?
            .try_deserialize()?;

        config.prefix = normalize_prefix(&config.prefix);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ApiError::Config("host is empty".to_string()));
        }

        if self.prefix.chars().any(char::is_whitespace) {
            return Err(ApiError::Config(format!(
                "prefix must not contain whitespace: {:?}",
                self.prefix
            )));
        }

        Ok(())
    }

    /// "host:port" string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logging settings for the API process
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            dir: self.log_dir.clone(),
            file_name: self.log_file.clone(),
            default_directive: "spam_api=info,spam_detection=info,tower_http=info".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            prefix: "/api/v1".to_string(),
            log_dir: PathBuf::from("logs"),
            log_file: "api.log".to_string(),
        }
    }
}

/// Leading slash, no trailing slash; "" and "/" both mean the root
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
