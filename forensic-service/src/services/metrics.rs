//! Metrics collection and Prometheus export.
//!
//! HTTP request metrics come from the shared middleware; this module adds
//! analysis outcomes and upstream latency, and renders `/api/metrics`.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
            tracing::info!("Prometheus metrics initialized");
        }
        Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed"),
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a finished analysis by outcome (`bonafide`, `spoof`, `unparsed`,
/// or an error kind).
pub fn record_analysis(outcome: &'static str) {
    counter!("forensic_analyses_total", "outcome" => outcome).increment(1);
}

pub fn record_provider_latency(provider: &'static str, model: &str, duration_secs: f64) {
    histogram!(
        "forensic_provider_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(duration_secs);
}
