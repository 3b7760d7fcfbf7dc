//! Static bundle serving and the SPA fallback.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{bare_config, body_bytes, body_json, oneshot};
use forensic_service::startup::{build_router, AppState};
use tempfile::TempDir;

const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";
const APP_JS: &str = "console.log('trace');";

/// A bundle directory shaped like a Vite build.
fn bundle() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets").join("app.js"), APP_JS).unwrap();
    dir
}

fn router_for(dist: &TempDir) -> Router {
    let mut config = bare_config();
    config.frontend.dist_dir = Some(dist.path().to_path_buf());
    build_router(AppState::from_config(config).expect("Failed to build state"))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn serves_bundle_files() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/assets/app.js")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("javascript"));
    assert_eq!(body_bytes(response).await, APP_JS.as_bytes());
}

#[tokio::test]
async fn root_serves_index() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn client_routes_fall_back_to_index() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/results/1234")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn unknown_api_path_is_not_found_even_with_bundle() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/api/unknown")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "Not Found");
}

#[tokio::test]
async fn api_routes_take_precedence_over_bundle() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/api/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "online");
}

#[tokio::test]
async fn frontend_responses_use_same_origin_csp() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/")).await;

    let csp = response.headers()[header::CONTENT_SECURITY_POLICY]
        .to_str()
        .unwrap();
    assert!(csp.starts_with("default-src 'self'"));
}

#[tokio::test]
async fn missing_bundle_returns_diagnostic() {
    let router = build_router(AppState::from_config(bare_config()).expect("Failed to build state"));

    let response = oneshot(router, get("/anything")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Frontend bundle not found");
    assert_eq!(body["searched"][0], "/nonexistent/trace-forensic/dist");
}

#[tokio::test]
async fn directory_without_index_is_not_a_bundle() {
    let dist = tempfile::tempdir().unwrap();
    std::fs::write(dist.path().join("app.js"), APP_JS).unwrap();

    let response = oneshot(router_for(&dist), get("/app.js")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "Frontend bundle not found");
}

#[tokio::test]
async fn bundle_directory_redirects_to_trailing_slash_then_falls_back() {
    let dist = bundle();

    let response = oneshot(router_for(&dist), get("/assets")).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/assets/");

    let response = oneshot(router_for(&dist), get("/assets/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, INDEX_HTML.as_bytes());
}
