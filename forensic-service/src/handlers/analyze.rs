use crate::models::AnalysisRequest;
use crate::services::{metrics, run_analysis, AnalysisError};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

/// `POST /api/analyze`.
///
/// The credential is checked before the body, so an unconfigured service
/// answers 500 whatever the caller sent. A body that is not a valid
/// `{audio, mime}` object is reported as a decode failure.
pub async fn analyze_audio(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = match (state.provider.as_deref(), body) {
        (None, _) => Err(AnalysisError::MissingApiKey),
        (Some(_), Err(rejection)) => Err(AnalysisError::InvalidBody(rejection.body_text())),
        (Some(provider), Ok(Json(request))) => run_analysis(provider, &request).await,
    };

    result.map(Json).map_err(|e| {
        tracing::error!(kind = e.kind(), error = %e, "Forensic Engine Failure");
        metrics::record_analysis(e.kind());
        AppError::from(e)
    })
}
