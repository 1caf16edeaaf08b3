//! API Server - HTTP server for the classifier

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use spam_detection::Classifier;

use crate::config::{normalize_prefix, ApiConfig};
use crate::handlers::{self, AppState};

/// Build the router with all routes under `prefix`
pub fn router(state: Arc<AppState>, prefix: &str) -> Router {
    let prefix = normalize_prefix(prefix);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(&format!("{}/health", prefix), get(handlers::health))
        .route(&format!("{}/predict", prefix), post(handlers::predict))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// API Server
pub struct ApiServer {
    state: Arc<AppState>,
    config: ApiConfig,
}

impl ApiServer {
    /// Create a new API server around an already constructed classifier
    pub fn new(config: ApiConfig, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            state: Arc::new(AppState::new(classifier)),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        router(self.state.clone(), &self.config.prefix)
    }

    /// Bind the configured address and serve until the process stops
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        let addr: SocketAddr = listener.local_addr()?;
        info!(
            "Starting API server on {} (prefix {:?})",
            addr, self.config.prefix
        );

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
