// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use analysis::{Extrema, OrderBlockScan};
pub use config::{ANALYSIS, AnalysisConfig};
pub use data::{NormalizeError, normalize};
pub use domain::{Candle, CanonicalSeries};
pub use engine::{AnalysisCache, AnalysisJob, TokenMonitor};
pub use models::{ClusterResult, OrderBlockZone, TokenModel, VolumeRange, ZoneKind, ZonePair};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a raw OHLCV payload (JSON) to analyze
    pub payload: std::path::PathBuf,

    /// Circulating token supply, used to scale prices into market-cap units
    #[arg(long)]
    pub supply: f64,

    /// Current market cap; drives support actionability and zone-entry checks
    #[arg(long)]
    pub marketcap: f64,

    /// Token mint address used to label the output
    #[arg(long, default_value = "unknown-mint")]
    pub mint: String,
}
