#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use forensic_service::config::ForensicConfig;
use forensic_service::startup::Application;
use http_body_util::BodyExt;
use secrecy::Secret;
use std::path::PathBuf;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-2.0-flash-exp";

/// "RIFF" as base64, enough for the service: it never inspects the audio.
pub const TEST_AUDIO_B64: &str = "UklGRg==";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on a random port with the given configuration.
    pub async fn spawn(mut config: ForensicConfig) -> Self {
        config.common.port = 0;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_analyze(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/analyze", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Configuration with no credential and no frontend bundle.
pub fn bare_config() -> ForensicConfig {
    let mut config = ForensicConfig::default();
    config.frontend.dist_dir = Some(PathBuf::from("/nonexistent/trace-forensic/dist"));
    config
}

/// Configuration pointing the Gemini provider at a mock server.
pub fn gemini_config(api_base: &str) -> ForensicConfig {
    let mut config = bare_config();
    config.google.api_key = Some(Secret::new(TEST_API_KEY.to_string()));
    config.google.api_base = api_base.to_string();
    config.google.timeout_secs = 5;
    config.models.analysis_model = TEST_MODEL.to_string();
    config
}

/// Gemini `generateContent` response whose single text part is `text`.
pub fn gemini_text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 80,
            "totalTokenCount": 200
        }
    })
}

pub async fn oneshot(router: Router, request: Request<Body>) -> Response {
    router.oneshot(request).await.expect("router call failed")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Failed to parse JSON")
}
