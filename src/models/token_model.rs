use serde::{Deserialize, Serialize};

use crate::models::zones::{OrderBlockZone, VolumeRange, ZonePair};

/// Complete analysis output for one token at one point in time.
/// This is the value the engine publishes and alerting collaborators consume.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenModel {
    pub mint: String,
    /// Market cap the analysis ran against
    pub marketcap: f64,

    /// Resolved support/resistance, `None` when the series had no structure
    pub zones: Option<ZonePair>,
    /// High-volume bands, ranked by volume descending
    pub volume_ranges: Vec<VolumeRange>,
    /// Order blocks found in this pass (pre-dedup against the active list)
    pub order_blocks: Vec<OrderBlockZone>,
    /// Diagnostic count from the order-block scan
    pub candles_analyzed: usize,

    pub analyzed_at_ms: i64,
}

impl TokenModel {
    /// Order blocks the current market cap has entered
    pub fn entered_blocks(&self, marketcap: f64, tolerance: f64) -> Vec<&OrderBlockZone> {
        self.order_blocks
            .iter()
            .filter(|zone| zone.is_entered(marketcap, tolerance))
            .collect()
    }

    /// Actionable support level, if one was resolved with confidence
    pub fn support_level(&self) -> Option<f64> {
        let pair = self.zones.as_ref()?;
        if pair.support.is_clustered {
            pair.support.mean
        } else {
            None
        }
    }

    /// Best-effort resistance level (present even for the low-confidence
    /// all-time-high fallback)
    pub fn resistance_level(&self) -> Option<f64> {
        self.zones.as_ref()?.resistance.mean
    }
}
