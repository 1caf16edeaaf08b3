//! Router tests driven through `tower::ServiceExt::oneshot`

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use spam_api::handlers::AppState;
use spam_api::router;
use spam_detection::{Classifier, DetectionError, LoadPolicy, Prediction, SpamDetector};

enum Reply {
    Answer(Prediction),
    ModelFailure,
    Rejected,
}

/// Classifier returning a fixed reply and recording every input
struct MockClassifier {
    reply: Reply,
    calls: Mutex<Vec<String>>,
}

impl MockClassifier {
    fn with_reply(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn returning(class_id: u32, label: &str) -> Arc<Self> {
        Self::with_reply(Reply::Answer(Prediction {
            class_id,
            label: label.to_string(),
        }))
    }

    fn failing() -> Arc<Self> {
        Self::with_reply(Reply::ModelFailure)
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Classifier for MockClassifier {
    fn predict(&self, text: &str) -> spam_detection::Result<Prediction> {
        self.calls.lock().unwrap().push(text.to_string());
        match &self.reply {
            Reply::Answer(prediction) => Ok(prediction.clone()),
            Reply::ModelFailure => Err(DetectionError::Model("mock failure".to_string())),
            Reply::Rejected => Err(DetectionError::InvalidInput("unusable text".to_string())),
        }
    }
}

fn app(classifier: Arc<dyn Classifier>) -> Router {
    router(Arc::new(AppState::new(classifier)), "/api/v1")
}

fn post_predict(body: &str) -> Request<Body> {
    Request::post("/api/v1/predict")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let resp = app(MockClassifier::returning(0, "ham"))
        .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_predict_returns_classifier_answer() {
    let mock = MockClassifier::returning(1, "spam");
    let resp = app(mock.clone())
        .oneshot(post_predict(r#"{"text": "free cash now"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"input_text": "free cash now", "prediction": 1, "label": "spam"})
    );
    assert_eq!(mock.calls(), vec!["free cash now".to_string()]);
}

#[tokio::test]
async fn test_predict_rejects_empty_text() {
    for body in [r#"{"text": ""}"#, r#"{"text": "   \n\t"}"#] {
        let mock = MockClassifier::returning(0, "ham");
        let resp = app(mock.clone()).oneshot(post_predict(body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["error"].is_string());
        assert!(mock.calls().is_empty());
    }
}

#[tokio::test]
async fn test_predict_rejects_malformed_bodies() {
    for body in [r#"{"text": 42}"#, r#"{"message": "hi"}"#, "not json", r#"["text"]"#] {
        let mock = MockClassifier::returning(0, "ham");
        let resp = app(mock.clone()).oneshot(post_predict(body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
        assert!(json_body(resp).await["error"].is_string());
        assert!(mock.calls().is_empty());
    }
}

#[tokio::test]
async fn test_predict_reports_inference_failure() {
    let resp = app(MockClassifier::failing())
        .oneshot(post_predict(r#"{"text": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(resp).await["error"],
        "Internal error during inference: Model error: mock failure"
    );
}

#[tokio::test]
async fn test_predict_maps_classifier_validation_error_to_bad_request() {
    let mock = MockClassifier::with_reply(Reply::Rejected);
    let resp = app(mock.clone())
        .oneshot(post_predict(r#"{"text": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "Invalid input: unusable text");
    assert_eq!(mock.calls(), vec!["hello".to_string()]);
}

#[tokio::test]
async fn test_predict_without_artifact_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let detector = SpamDetector::new(dir.path().join("missing.json"), LoadPolicy::Cached);

    let resp = app(Arc::new(detector))
        .oneshot(post_predict(r#"{"text": "free cash now"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(resp).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Internal error during inference: Model artifact not found"));
}

#[tokio::test]
async fn test_routes_follow_prefix() {
    let state = Arc::new(AppState::new(MockClassifier::returning(0, "ham")));

    let resp = router(state.clone(), "")
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = router(state, "/api/v1")
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
