//! The analyze pipeline: decode, relay to the provider, parse the verdict.

use crate::models::{AnalysisReport, AnalysisRequest};
use crate::services::metrics;
use crate::services::prompt::{FORENSIC_PROMPT, SYSTEM_INSTRUCTION};
use crate::services::providers::{AnalysisInput, AnalysisProvider, FinishReason, ProviderError};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use service_core::error::AppError;
use std::time::Instant;
use thiserror::Error;

/// Standard alphabet, padding optional. Browsers and CLI encoders disagree
/// on trailing `=`.
const AUDIO_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("API_KEY not configured")]
    MissingApiKey,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid MIME type: expected a non-empty media type")]
    InvalidMime,

    #[error("Invalid base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Audio payload is empty")]
    EmptyAudio,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Received empty response from Gemini API")]
    EmptyResponse,

    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::MissingApiKey => "config_error",
            AnalysisError::InvalidBody(_)
            | AnalysisError::InvalidMime
            | AnalysisError::Decode(_)
            | AnalysisError::EmptyAudio => "decode_error",
            AnalysisError::Provider(_)
            | AnalysisError::EmptyResponse
            | AnalysisError::InvalidJson(_) => "upstream_error",
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::MissingApiKey => AppError::ConfigError(anyhow::anyhow!("{}", err)),
            other => {
                AppError::InternalError(anyhow::anyhow!("Forensic Engine Failure: {}", other))
            }
        }
    }
}

/// Decode the request's audio. Accepts bare base64 or a browser data URL,
/// and ignores embedded whitespace.
pub fn decode_audio(encoded: &str) -> Result<Vec<u8>, AnalysisError> {
    let payload = match encoded.trim_start().strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, data)| data)
            .unwrap_or(rest),
        None => encoded,
    };

    let cleaned: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let audio = AUDIO_B64.decode(cleaned.as_bytes())?;
    if audio.is_empty() {
        return Err(AnalysisError::EmptyAudio);
    }
    Ok(audio)
}

/// Run one analysis against `provider` and return the model's JSON verdict.
pub async fn run_analysis(
    provider: &dyn AnalysisProvider,
    request: &AnalysisRequest,
) -> Result<serde_json::Value, AnalysisError> {
    let mime_type = request.mime.trim();
    if mime_type.is_empty() {
        return Err(AnalysisError::InvalidMime);
    }

    let audio = decode_audio(&request.audio)?;

    let started = Instant::now();
    let response = provider
        .analyze(AnalysisInput {
            audio: &audio,
            mime_type,
            prompt: FORENSIC_PROMPT,
            system_instruction: Some(SYSTEM_INSTRUCTION),
        })
        .await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        started.elapsed().as_secs_f64(),
    );
    let response = response?;

    if response.finish_reason != FinishReason::Complete {
        tracing::warn!(
            finish_reason = ?response.finish_reason,
            model = provider.model(),
            "Model stopped before finishing its answer"
        );
    }

    let text = response
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(AnalysisError::EmptyResponse)?;

    let verdict: serde_json::Value = serde_json::from_str(&text)?;

    match AnalysisReport::from_value(&verdict).and_then(|r| r.decision.map(|d| (d, r))) {
        Some((decision, report)) => {
            tracing::info!(
                decision = decision.as_str(),
                confidence = ?report.confidence(),
                audio_bytes = audio.len(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "Forensic analysis complete"
            );
            metrics::record_analysis(match decision {
                crate::models::Decision::Bonafide => "bonafide",
                crate::models::Decision::Spoof => "spoof",
            });
        }
        None => {
            tracing::warn!(
                audio_bytes = audio.len(),
                "Model verdict does not carry a decision; returning it as-is"
            );
            metrics::record_analysis("unparsed");
        }
    }

    Ok(verdict)
}
