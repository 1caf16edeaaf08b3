// E2E Test 2: Error responses over HTTP

mod e2e;

use e2e::helpers::TestEnv;
use serde_json::{json, Value};
use spam_detection::LoadPolicy;

#[tokio::test]
async fn test_e2e_2_empty_text_is_bad_request() {
    let env = TestEnv::trained(LoadPolicy::Cached).await.unwrap();

    let resp = reqwest::Client::new()
        .post(env.url("/predict"))
        .json(&json!({"text": "  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.json::<Value>().await.unwrap()["error"].is_string());
}

#[tokio::test]
async fn test_e2e_2_missing_artifact_is_internal_error() {
    let env = TestEnv::untrained().await.unwrap();
    assert!(!env.model_path.exists());

    let resp = reqwest::Client::new()
        .post(env.url("/predict"))
        .json(&json!({"text": "free cash now"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let body: Value = resp.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Internal error during inference:"), "{}", error);
}

#[tokio::test]
async fn test_e2e_2_artifact_removed_under_per_request_policy() {
    let env = TestEnv::trained(LoadPolicy::PerRequest).await.unwrap();
    let client = reqwest::Client::new();

    let resp = client
        .post(env.url("/predict"))
        .json(&json!({"text": "free cash now"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    std::fs::remove_file(&env.model_path).unwrap();
    let resp = client
        .post(env.url("/predict"))
        .json(&json!({"text": "free cash now"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}
