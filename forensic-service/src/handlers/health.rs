use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Engine label reported by the health endpoint.
pub const ENGINE: &str = "TRACE-AASIST-V2";

/// Liveness. Does not depend on the upstream credential.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "engine": ENGINE,
        "service": "forensic-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
