//! Request and report types for the forensic engine.

pub mod analysis;

pub use analysis::{AnalysisReport, AnalysisRequest, Decision};
