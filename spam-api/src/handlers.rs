//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use spam_detection::Classifier;

use crate::error::ApiError;

/// Shared application state
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

/// Prediction request body
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictResponse {
    pub input_text: String,
    pub prediction: u32,
    pub label: String,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET {prefix}/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST {prefix}/predict - Classify one text
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected predict request: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    if request.text.trim().is_empty() {
        warn!("Rejected predict request: empty text");
        return Err(ApiError::BadRequest(
            "Field 'text' must not be empty".to_string(),
        ));
    }

    info!("Predict request ({} chars)", request.text.chars().count());

    let classifier = state.classifier.clone();
    let text = request.text.clone();
    let outcome = tokio::task::spawn_blocking(move || classifier.predict(&text))
        .await
        .map_err(|e| {
            error!("Inference task failed: {}", e);
            ApiError::Inference(e.to_string())
        })?;

    match outcome {
        Ok(prediction) => {
            info!(
                class_id = prediction.class_id,
                label = %prediction.label,
                "Prediction served"
            );
            Ok(Json(PredictResponse {
                input_text: request.text,
                prediction: prediction.class_id,
                label: prediction.label,
            }))
        }
        Err(e) if e.is_validation() => {
            warn!("Classifier rejected the input: {}", e);
            Err(ApiError::BadRequest(e.to_string()))
        }
        Err(e) => {
            error!("Inference failed for a {} char input: {}", request.text.len(), e);
            Err(ApiError::Inference(e.to_string()))
        }
    }
}
