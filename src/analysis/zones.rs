use statrs::statistics::Statistics;

use crate::analysis::{cluster, extrema};
use crate::config::AnalysisConfig;
use crate::domain::CanonicalSeries;
use crate::models::{ClusterResult, ZoneKind, ZonePair};
use crate::utils::maths_utils::fraction_within;

/// Resolve final support and resistance levels for a series.
///
/// Clustering runs twice per side: a first pass whose only job is to seed
/// the opposing side's cross-reference, then the pass that counts. Returns
/// `None` when the series has no extrema at all; otherwise a best-effort
/// answer always comes back (resistance degrades to the all-time high, and
/// support that isn't meaningfully below price degrades to the plain
/// trough average).
pub fn resolve(
    series: &CanonicalSeries,
    current_marketcap: f64,
    config: &AnalysisConfig,
) -> Option<ZonePair> {
    let extrema = extrema::detect(series, config);
    if extrema.is_empty() {
        log::info!(
            "insufficient structure: no extrema in {} candles, skipping zone resolution",
            series.len()
        );
        return None;
    }

    // Seed pass, no cross-referencing
    let seed_trough = cluster::analyze(&extrema.troughs, None, ZoneKind::Support, config);
    let seed_peak = cluster::analyze(&extrema.peaks, None, ZoneKind::Resistance, config);

    // The pass that counts, each side seeded with the other's first cut
    let resistance = cluster::analyze(
        &extrema.peaks,
        seed_trough.clustered_mean(),
        ZoneKind::Resistance,
        config,
    );
    let support = cluster::analyze(
        &extrema.troughs,
        seed_peak.clustered_mean(),
        ZoneKind::Support,
        config,
    );

    let resistance = if resistance.is_clustered {
        resistance
    } else {
        // No consensus among the peaks; the all-time high is still a level
        // traders watch, so report that instead of nothing
        ClusterResult::low_confidence(series.all_time_high(), config.zones.ath_band_pct)
    };

    let support = finalize_support(support, &extrema.troughs, current_marketcap, config);

    let resistance_strength = strength(&extrema.peaks, &resistance, config);
    let support_strength = strength(&extrema.troughs, &support, config);

    Some(ZonePair {
        support,
        resistance,
        support_strength,
        resistance_strength,
    })
}

/// A clustered support only counts when it sits meaningfully below the
/// current market cap; a "support" at or above price is nonsense. Anything
/// else degrades to the plain trough average.
fn finalize_support(
    support: ClusterResult,
    troughs: &[f64],
    current_marketcap: f64,
    config: &AnalysisConfig,
) -> ClusterResult {
    let actionable_ceiling = current_marketcap * config.zones.support_actionable_fraction;
    if support.is_clustered && support.mean.is_some_and(|mean| mean < actionable_ceiling) {
        return support;
    }
    if troughs.is_empty() {
        return ClusterResult::degenerate();
    }
    let trough_mean = troughs.iter().mean();
    ClusterResult::low_confidence(trough_mean, config.zones.support_fallback_band_pct)
}

/// Fraction of the side's extrema that agree with the final mean.
/// An empty extrema set (or a meanless result) scores 0, not an error.
fn strength(levels: &[f64], result: &ClusterResult, config: &AnalysisConfig) -> f64 {
    match result.mean {
        Some(mean) => fraction_within(levels, mean, config.zones.strength_similarity_pct),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;

    /// Candles tracing two valleys down to ~`bottom` with scattered highs.
    fn double_bottom_series(bottom: f64) -> CanonicalSeries {
        let mut lows = Vec::new();
        // First descent and recovery
        lows.extend([1.40, 1.30, 1.20, 1.10, 1.003, 1.12, 1.25, 1.32].map(|m| bottom * m));
        // Second descent, marginally different level (within 1%)
        lows.extend([1.38, 1.28, 1.18, 1.08, 0.997, 1.13, 1.27, 1.35].map(|m| bottom * m));
        let len = lows.len();
        let highs: Vec<f64> = lows.iter().map(|l| l * 1.5).collect();
        CanonicalSeries {
            opens: lows.iter().map(|l| l * 1.2).collect(),
            closes: lows.iter().map(|l| l * 1.3).collect(),
            highs,
            lows,
            volumes: vec![10.0; len],
            open_times_ms: vec![0; len],
        }
    }

    #[test]
    fn double_bottom_resolves_clustered_support() {
        let bottom = 50_000.0;
        let pair = resolve(&double_bottom_series(bottom), 200_000.0, &ANALYSIS)
            .expect("structure should be found");
        let support = &pair.support;
        assert!(support.is_clustered, "double bottom should form a cluster");
        let mean = support.mean.unwrap();
        assert!(
            (mean - bottom).abs() / bottom < 0.01,
            "support mean {} should land within 1% of {}",
            mean,
            bottom
        );
        // Tight band: consensus level
        let band = support.range_high.unwrap() / mean - 1.0;
        assert!((band - 0.03).abs() < 1e-9);
        assert!(pair.support_strength > 0.0);
    }

    #[test]
    fn support_above_actionable_ceiling_falls_back_to_trough_mean() {
        let bottom = 50_000.0;
        // Current cap barely above the bottoms: clustered support would sit
        // at ~83% of price, far beyond the 30% ceiling
        let pair = resolve(&double_bottom_series(bottom), 60_000.0, &ANALYSIS).unwrap();
        assert!(!pair.support.is_clustered);
        let band = pair.support.range_high.unwrap() / pair.support.mean.unwrap() - 1.0;
        assert!((band - 0.03).abs() < 1e-9, "fallback keeps the 3% band");
    }

    #[test]
    fn resistance_falls_back_to_all_time_high() {
        let series = double_bottom_series(50_000.0);
        let ath = series.all_time_high();
        let pair = resolve(&series, 200_000.0, &ANALYSIS).unwrap();
        if !pair.resistance.is_clustered {
            assert_eq!(pair.resistance.mean, Some(ath));
        }
        // Either way a resistance level must be reported
        assert!(pair.resistance.mean.is_some());
    }

    #[test]
    fn structureless_series_resolves_to_none() {
        let flat = CanonicalSeries {
            opens: vec![100.0; 30],
            highs: vec![100.0; 30],
            lows: vec![100.0; 30],
            closes: vec![100.0; 30],
            volumes: vec![1.0; 30],
            open_times_ms: vec![0; 30],
        };
        assert!(resolve(&flat, 100.0, &ANALYSIS).is_none());
    }
}
