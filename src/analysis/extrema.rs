use find_peaks::PeakFinder;

use crate::config::AnalysisConfig;
use crate::domain::CanonicalSeries;

/// Structural price levels pulled from the high and low channels.
/// Empty sets mean "no structure found", which is a valid answer for a
/// flat or too-short series, not an error.
#[derive(Debug, Clone, Default)]
pub struct Extrema {
    pub peaks: Vec<f64>,
    pub troughs: Vec<f64>,
}

impl Extrema {
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty() && self.troughs.is_empty()
    }
}

/// Find local maxima of the high channel and local minima of the low channel.
///
/// The prominence floor is relative to the full observed range so the same
/// settings work for a 10k market cap and a 10M one. Minima are found by
/// negating the lows and reusing the maxima routine.
pub fn detect(series: &CanonicalSeries, config: &AnalysisConfig) -> Extrema {
    let span = series.price_range();
    if !span.is_finite() || span <= 0.0 {
        // Degenerate channel: every candle at the same level (or junk)
        return Extrema::default();
    }
    let min_prominence = span * config.extrema.min_prominence_pct;

    let peaks = channel_maxima(&series.highs, min_prominence, config)
        .into_iter()
        .map(|idx| series.highs[idx])
        .collect();

    let negated_lows: Vec<f64> = series.lows.iter().map(|low| -low).collect();
    let troughs = channel_maxima(&negated_lows, min_prominence, config)
        .into_iter()
        .map(|idx| series.lows[idx])
        .collect();

    Extrema { peaks, troughs }
}

/// Indices of accepted local maxima, in time order.
fn channel_maxima(values: &[f64], min_prominence: f64, config: &AnalysisConfig) -> Vec<usize> {
    let mut finder = PeakFinder::new(values);
    finder.with_min_prominence(min_prominence);
    finder.with_min_distance(config.extrema.min_distance);
    finder.with_min_plateau_size(config.extrema.min_width);

    let mut positions: Vec<usize> = finder
        .find_peaks()
        .iter()
        .map(|peak| peak.middle_position())
        .collect();
    positions.sort_unstable();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;

    fn series_from_channels(highs: Vec<f64>, lows: Vec<f64>) -> CanonicalSeries {
        let len = highs.len();
        CanonicalSeries {
            opens: highs.iter().map(|h| h - 1.0).collect(),
            closes: highs.iter().map(|h| h - 0.5).collect(),
            highs,
            lows,
            volumes: vec![1.0; len],
            open_times_ms: vec![0; len],
        }
    }

    #[test]
    fn finds_single_peak_and_trough() {
        let highs = vec![100.0, 110.0, 160.0, 112.0, 101.0, 99.0, 98.0];
        let lows = vec![95.0, 90.0, 88.0, 60.0, 85.0, 88.0, 89.0];
        let extrema = detect(&series_from_channels(highs, lows), &ANALYSIS);
        assert_eq!(extrema.peaks, vec![160.0], "prominent high should register");
        assert_eq!(extrema.troughs, vec![60.0], "prominent low should register");
    }

    #[test]
    fn flat_series_has_no_structure() {
        let extrema = detect(
            &series_from_channels(vec![100.0; 20], vec![100.0; 20]),
            &ANALYSIS,
        );
        assert!(extrema.is_empty());
    }

    #[test]
    fn noise_below_prominence_floor_is_ignored() {
        // 1000-wide range; wiggles of 2 are well under the 1% floor (10)
        let mut highs = vec![500.0; 30];
        highs[5] = 502.0;
        highs[15] = 501.0;
        let mut lows = vec![400.0; 30];
        lows[0] = 0.0; // stretch the range
        lows[20] = 398.0;
        let extrema = detect(&series_from_channels(highs, lows), &ANALYSIS);
        assert!(extrema.peaks.is_empty(), "2-unit wiggle is noise, not a peak");
        assert!(extrema.troughs.is_empty());
    }
}
