//! Prebuilt single-page frontend.
//!
//! The bundle directory is resolved once at startup. When present, files are
//! served from it and every other non-API path gets `index.html` so the
//! client-side router can take over.

use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};

/// Entry document of the bundle.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendBundle {
    /// Directory containing `index.html`.
    Found(PathBuf),
    /// No candidate qualified.
    Missing { searched: Vec<PathBuf> },
}

impl FrontendBundle {
    /// Pick the first candidate directory that holds an `index.html`.
    pub fn resolve(candidates: Vec<PathBuf>) -> Self {
        match candidates.iter().find(|dir| is_bundle_dir(dir)) {
            Some(dir) => {
                let dir = dir.canonicalize().unwrap_or_else(|_| dir.clone());
                tracing::info!(path = %dir.display(), "Serving frontend bundle");
                FrontendBundle::Found(dir)
            }
            None => {
                tracing::warn!(
                    searched = ?candidates,
                    "Frontend bundle not found; non-API paths will return a diagnostic"
                );
                FrontendBundle::Missing {
                    searched: candidates,
                }
            }
        }
    }

    /// Static file service with SPA fallback, if a bundle was found.
    pub fn serve_dir(&self) -> Option<ServeDir<ServeFile>> {
        match self {
            FrontendBundle::Found(dir) => {
                Some(ServeDir::new(dir).fallback(ServeFile::new(dir.join(INDEX_FILE))))
            }
            FrontendBundle::Missing { .. } => None,
        }
    }
}

fn is_bundle_dir(dir: &Path) -> bool {
    dir.is_dir() && dir.join(INDEX_FILE).is_file()
}

/// Fallback for non-API paths when there is no bundle to serve.
pub async fn bundle_missing(State(state): State<AppState>) -> impl IntoResponse {
    let searched: Vec<String> = match state.frontend.as_ref() {
        FrontendBundle::Missing { searched } => {
            searched.iter().map(|p| p.display().to_string()).collect()
        }
        FrontendBundle::Found(dir) => vec![dir.display().to_string()],
    };

    Json(json!({
        "status": "online",
        "detail": "Frontend bundle not found",
        "searched": searched
    }))
}

/// Fallback for unmatched paths under `/api`.
pub async fn api_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not Found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_first_directory_with_index() {
        let empty = tempfile::tempdir().unwrap();
        let bundle = tempfile::tempdir().unwrap();
        std::fs::write(bundle.path().join(INDEX_FILE), "<html></html>").unwrap();

        let resolved = FrontendBundle::resolve(vec![
            empty.path().to_path_buf(),
            bundle.path().to_path_buf(),
        ]);

        assert_eq!(
            resolved,
            FrontendBundle::Found(bundle.path().canonicalize().unwrap())
        );
        assert!(resolved.serve_dir().is_some());
    }

    #[test]
    fn missing_bundle_remembers_search_list() {
        let candidates = vec![PathBuf::from("/nonexistent/trace/dist")];

        let resolved = FrontendBundle::resolve(candidates.clone());

        assert_eq!(
            resolved,
            FrontendBundle::Missing {
                searched: candidates
            }
        );
        assert!(resolved.serve_dir().is_none());
    }
}
