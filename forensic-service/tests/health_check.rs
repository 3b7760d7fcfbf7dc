//! Health, metrics and cross-cutting response headers.

mod common;

use common::{bare_config, gemini_config, TestApp};

#[tokio::test]
async fn health_check_is_online_without_credential() {
    let app = TestApp::spawn(bare_config()).await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "online");
    assert_eq!(body["engine"], "TRACE-AASIST-V2");
    assert_eq!(body["service"], "forensic-service");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_check_is_online_with_credential() {
    let app = TestApp::spawn(gemini_config("http://127.0.0.1:9")).await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "online");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn(bare_config()).await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = TestApp::spawn(bare_config()).await;

    let response = app
        .client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/analyze", app.address),
        )
        .header("origin", "https://trace.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let app = TestApp::spawn(bare_config()).await;

    let response = app
        .client
        .get(format!("{}/api/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
}
