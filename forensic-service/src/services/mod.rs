pub mod analysis;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use self::analysis::{run_analysis, AnalysisError};
pub use self::metrics::{get_metrics, init_metrics};
