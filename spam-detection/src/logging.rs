//! Process-wide logging setup
//!
//! Logging is initialized once per process through [`Logging::init`]. The
//! returned handle is passed to the components that log; calling `init` again
//! hands back the existing handle instead of registering a second set of
//! writers.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing::{debug, Span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Result;

static LOGGING: OnceLock<Logging> = OnceLock::new();

/// Where and how verbosely to log
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Directory receiving the log file
    pub dir: PathBuf,
    /// Log file name inside `dir`
    pub file_name: String,
    /// Filter used when `RUST_LOG` is not set (e.g. "spam_detection=info")
    pub default_directive: String,
}

/// Handle to the initialized logging system
#[derive(Debug, Clone)]
pub struct Logging {
    log_file: Option<PathBuf>,
}

impl Logging {
    /// Initialize stdout + file logging, or return the existing handle
    pub fn init(settings: &LogSettings) -> Result<Self> {
        if let Some(existing) = LOGGING.get() {
            return Ok(existing.clone());
        }

        std::fs::create_dir_all(&settings.dir)?;
        let log_file = settings.dir.join(&settings.file_name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.default_directive));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .try_init();

        let handle = LOGGING.get_or_init(|| Logging {
            log_file: Some(log_file),
        });

        if installed.is_err() {
            // Another subscriber owns the global slot (test harness, embedding app)
            debug!("Global tracing subscriber already set; reusing it");
        }

        Ok(handle.clone())
    }

    /// Handle for code paths that never initialize logging (tests, embedding)
    pub fn disabled() -> Self {
        Self { log_file: None }
    }

    /// File receiving log output, if any
    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Span tagging every event of a component with its name
    pub fn component(&self, name: &'static str) -> Span {
        tracing::info_span!("spam", component = name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_returns_same_handle() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            dir: dir.path().to_path_buf(),
            file_name: "test.log".to_string(),
            default_directive: "spam_detection=debug".to_string(),
        };

        let first = Logging::init(&settings).unwrap();
        let second = Logging::init(&LogSettings {
            file_name: "other.log".to_string(),
            ..settings.clone()
        })
        .unwrap();

        assert_eq!(first.log_file(), second.log_file());
        assert!(!dir.path().join("other.log").exists());
    }

    #[test]
    fn test_disabled_handle_has_no_file() {
        let logging = Logging::disabled();
        assert!(logging.log_file().is_none());
        let _span = logging.component("test");
    }
}
