// Caller-side orchestration: per-token state, recompute debounce, batch runs
pub mod cache;
pub mod monitor;

// Re-export key components
pub use cache::AnalysisCache;
pub use monitor::{AnalysisJob, TokenMonitor, TokenState};
