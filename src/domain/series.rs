use serde::{Deserialize, Serialize};

use crate::domain::candle::Candle;
use crate::utils::maths_utils;

// ============================================================================
// CanonicalSeries: normalized market-cap candles for one token
// ============================================================================

/// Column-oriented candle storage. All price channels are market-cap units,
/// ordered by time ascending, guaranteed gap-free by the normalizer.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CanonicalSeries {
    // Prices
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,

    // Volumes (never scaled by supply)
    pub volumes: Vec<f64>,

    // Candle open times in epoch ms; zeros when the feed had no timestamps
    pub open_times_ms: Vec<i64>,
}

impl CanonicalSeries {
    pub fn len(&self) -> usize {
        self.opens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opens.is_empty()
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.opens[idx],
            self.highs[idx],
            self.lows[idx],
            self.closes[idx],
            self.volumes[idx],
            self.open_times_ms[idx],
        )
    }

    /// Full observed price span: max(high) - min(low)
    pub fn price_range(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        maths_utils::get_max(&self.highs) - maths_utils::get_min(&self.lows)
    }

    pub fn all_time_high(&self) -> f64 {
        maths_utils::get_max(&self.highs)
    }

    /// Rolling sum of each candle's volume plus the two preceding candles'.
    /// The first two entries sum whatever history exists.
    pub fn vol_sum_3(&self) -> Vec<f64> {
        self.volumes
            .iter()
            .enumerate()
            .map(|(i, &vol)| {
                let from = i.saturating_sub(2);
                vol + self.volumes[from..i].iter().sum::<f64>()
            })
            .collect()
    }
}
