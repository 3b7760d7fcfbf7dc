//! HTTP handlers for the forensic service.
//!
//! Everything under `/api` is JSON; every other path belongs to the
//! frontend bundle.

pub mod analyze;
pub mod frontend;
pub mod health;
pub mod metrics;

pub use analyze::analyze_audio;
pub use frontend::{api_not_found, bundle_missing, FrontendBundle};
pub use health::health_check;
pub use self::metrics::metrics_endpoint;
