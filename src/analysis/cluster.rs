use statrs::statistics::Statistics;

use crate::config::AnalysisConfig;
use crate::models::{ClusterResult, ZoneKind};
use crate::utils::maths_utils::relative_distance;

/// Group a set of extrema levels into a dominant cluster.
///
/// The decision ladder, in order:
/// 1. Fewer than two finite levels: nothing to cluster.
/// 2. No level near the overall mean: low confidence around that mean.
/// 3. A majority of levels agree: consensus, tight band.
/// 4. A minority agrees but the opposing side's cluster mean is known:
///    band width depends on how far apart the two sides sit.
/// 5. A minority agrees and there is nothing to cross-reference against:
///    low confidence.
///
/// `other_cluster_mean` should come from a *clustered* result on the
/// opposing side (see `ClusterResult::clustered_mean`), never from a
/// best-effort average.
pub fn analyze(
    levels: &[f64],
    other_cluster_mean: Option<f64>,
    kind: ZoneKind,
    config: &AnalysisConfig,
) -> ClusterResult {
    let settings = &config.cluster;

    let finite: Vec<f64> = levels.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return ClusterResult::degenerate();
    }

    let mean = finite.iter().mean();
    let similar: Vec<f64> = finite
        .iter()
        .copied()
        .filter(|&level| relative_distance(level, mean) <= settings.similarity_pct)
        .collect();

    if similar.is_empty() {
        // Levels so dispersed the mean attracts none of them
        return ClusterResult::low_confidence(mean, settings.default_band_pct);
    }

    let similar_mean = similar.iter().mean();

    if similar.len() as f64 / finite.len() as f64 >= settings.majority_fraction {
        log::debug!(
            "{} consensus: {}/{} levels agree at {:.2}",
            kind,
            similar.len(),
            finite.len(),
            similar_mean
        );
        return ClusterResult::clustered(similar_mean, settings.tight_band_pct);
    }

    if let Some(other_mean) = other_cluster_mean {
        if relative_distance(similar_mean, other_mean) < settings.separation_pct {
            // Both sides sit close together; keep the bands from overlapping
            let band = match kind {
                ZoneKind::Resistance => settings.default_band_pct,
                ZoneKind::Support => settings.tight_band_pct,
            };
            return ClusterResult::clustered(similar_mean, band);
        }
        // Sides are already well separated, a generous band is safe
        return ClusterResult::clustered(similar_mean, settings.wide_band_pct);
    }

    ClusterResult::low_confidence(mean, settings.default_band_pct)
}
