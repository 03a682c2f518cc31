use std::collections::HashMap;

use crate::config::MonitorSettings;
use crate::utils::maths_utils::relative_distance;

/// What we remembered about a token's last analysis pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStamp {
    pub analyzed_at_ms: i64,
    pub marketcap: f64,
}

/// Recompute-debounce cache, keyed by token mint.
///
/// This is a plain value object owned by whoever drives the analysis; the
/// pure detection functions never see it. Holding it out here keeps cache
/// lifetime and invalidation a caller decision.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    stamps: HashMap<String, CacheStamp>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token is due for analysis when it has never been analyzed, its
    /// debounce window has elapsed, or its market cap moved past the
    /// recalc threshold inside the window.
    pub fn should_analyze(
        &self,
        mint: &str,
        now_ms: i64,
        marketcap: f64,
        settings: &MonitorSettings,
    ) -> bool {
        let Some(stamp) = self.stamps.get(mint) else {
            return true;
        };
        let elapsed_ms = now_ms.saturating_sub(stamp.analyzed_at_ms);
        if elapsed_ms >= settings.min_seconds_between_recalcs as i64 * 1000 {
            return true;
        }
        relative_distance(marketcap, stamp.marketcap) >= settings.marketcap_recalc_threshold_pct
    }

    pub fn record(&mut self, mint: &str, now_ms: i64, marketcap: f64) {
        self.stamps.insert(
            mint.to_string(),
            CacheStamp {
                analyzed_at_ms: now_ms,
                marketcap,
            },
        );
    }

    pub fn invalidate(&mut self, mint: &str) {
        self.stamps.remove(mint);
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    pub fn stamp(&self, mint: &str) -> Option<&CacheStamp> {
        self.stamps.get(mint)
    }
}
