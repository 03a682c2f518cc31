use serde::{Deserialize, Serialize};

/// Outcome of clustering a set of extrema levels.
///
/// The band half-width doubles as a confidence signal: a tight band means the
/// levels genuinely agreed, a wide one means the level was inferred by
/// elimination. When `is_clustered` is false, `mean` may still carry a
/// best-effort average but the band must be treated as low-confidence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterResult {
    pub is_clustered: bool,
    pub mean: Option<f64>,
    pub range_low: Option<f64>,
    pub range_high: Option<f64>,
}

impl ClusterResult {
    /// A consensus level: `range_low < mean < range_high` holds for any
    /// positive mean and band.
    pub fn clustered(mean: f64, band_pct: f64) -> Self {
        Self {
            is_clustered: true,
            mean: Some(mean),
            range_low: Some(mean * (1.0 - band_pct)),
            range_high: Some(mean * (1.0 + band_pct)),
        }
    }

    /// A best-effort level that never reached consensus.
    pub fn low_confidence(mean: f64, band_pct: f64) -> Self {
        Self {
            is_clustered: false,
            mean: Some(mean),
            range_low: Some(mean * (1.0 - band_pct)),
            range_high: Some(mean * (1.0 + band_pct)),
        }
    }

    /// Too few usable levels to say anything at all.
    pub fn degenerate() -> Self {
        Self::default()
    }

    /// The mean, but only when it came from a real cluster. Used to seed
    /// cross-referencing against the opposing side.
    pub fn clustered_mean(&self) -> Option<f64> {
        if self.is_clustered { self.mean } else { None }
    }
}
