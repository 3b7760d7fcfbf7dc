//! Application startup and lifecycle management.

use crate::config::ForensicConfig;
use crate::handlers::{self, FrontendBundle};
use crate::services::providers::gemini::{GeminiAnalysisProvider, GeminiConfig};
use crate::services::providers::AnalysisProvider;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ForensicConfig,
    /// `None` when no API key is configured; analyze requests then fail.
    pub provider: Option<Arc<dyn AnalysisProvider>>,
    pub frontend: Arc<FrontendBundle>,
}

impl AppState {
    /// Build state from configuration: create the Gemini provider if a key
    /// is set and locate the frontend bundle.
    pub fn from_config(config: ForensicConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn AnalysisProvider>> = match &config.google.api_key {
            Some(api_key) => {
                let gemini = GeminiAnalysisProvider::new(GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.models.analysis_model.clone(),
                    api_base: config.google.api_base.clone(),
                    timeout: Duration::from_secs(config.google.timeout_secs),
                })
                .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

                tracing::info!(
                    model = %config.models.analysis_model,
                    "Initialized Gemini analysis provider"
                );
                let provider: Arc<dyn AnalysisProvider> = Arc::new(gemini);
                Some(provider)
            }
            None => {
                tracing::warn!("API_KEY not set; /api/analyze will fail until it is configured");
                None
            }
        };

        let frontend = Arc::new(FrontendBundle::resolve(config.dist_candidates()));

        Ok(Self {
            config,
            provider,
            frontend,
        })
    }
}

/// Build the HTTP router: JSON API under `/api`, frontend bundle everywhere
/// else.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze", post(handlers::analyze_audio))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(handlers::api_not_found);

    let router = Router::new().nest("/api", api_routes);

    let router = match state.frontend.serve_dir() {
        Some(serve_dir) => router.fallback_service(serve_dir),
        None => router.fallback(handlers::bundle_missing),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(DefaultBodyLimit::max(state.config.limits.max_body_bytes))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application and bind its listener (port 0 = random port for
    /// testing).
    pub async fn build(config: ForensicConfig) -> Result<Self, AppError> {
        Self::build_with_state(AppState::from_config(config)?).await
    }

    /// Build around prepared state, e.g. with a mock provider.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Forensic service listening on port {}", port);

        let server = axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
