use std::cmp::Ordering;

use itertools::Itertools;

use crate::config::AnalysisConfig;
use crate::domain::CanonicalSeries;
use crate::models::VolumeRange;

/// Identify the price bands where the heaviest trading happened.
///
/// Candles are walked in volume-descending order (stable, so ties keep
/// their time order) and each candle's [low, high] band is accepted unless
/// both edges sit within tolerance of an already-accepted band. This is a
/// deduplication pass, not a top-K cut: output is bounded only by input
/// size, and callers typically intersect it with support/resistance bands.
pub fn find(series: &CanonicalSeries, config: &AnalysisConfig) -> Vec<VolumeRange> {
    let tolerance = config.volume_zones.dedup_tolerance_pct;
    let mut accepted: Vec<VolumeRange> = Vec::new();

    let ranked = (0..series.len()).sorted_by(|&a, &b| {
        series.volumes[b]
            .partial_cmp(&series.volumes[a])
            .unwrap_or(Ordering::Equal)
    });

    for idx in ranked {
        let candidate = VolumeRange {
            low: series.lows[idx],
            high: series.highs[idx],
            volume: series.volumes[idx],
        };
        let is_duplicate = accepted
            .iter()
            .any(|existing| candidate.is_near_duplicate(existing, tolerance));
        if !is_duplicate {
            accepted.push(candidate);
        }
    }

    accepted
}
