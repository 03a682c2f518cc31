//! Configuration module for the zone analysis engine.

pub mod analysis;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, ClusterSettings, ExtremaSettings, MonitorSettings,
    OrderBlockSettings, VolumeZoneSettings, ZoneSettings,
};
