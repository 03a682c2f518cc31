use std::cmp;

use statrs::statistics::Statistics;

use crate::config::AnalysisConfig;
use crate::domain::{CandleType, CanonicalSeries};
use crate::models::OrderBlockZone;

/// Result of one order-block scan. `candles_analyzed` is diagnostic only.
#[derive(Debug, Clone, Default)]
pub struct OrderBlockScan {
    pub zones: Vec<OrderBlockZone>,
    pub candles_analyzed: usize,
}

/// Scan the most recent `lookback` candles for bullish order blocks.
///
/// The pattern: a green candle with materially nonzero volume relative to
/// the three candles before it, whose high the very next candle closes
/// above. The green body is what gates; steady uptrends of red candles
/// never qualify no matter how strong the breakout looks.
///
/// Each candidate needs 3 prior candles for volume context and 1 following
/// candle for breakout confirmation, which fixes the scan window at
/// `[max(3, len - lookback), len - 2]`.
pub fn detect(
    series: &CanonicalSeries,
    lookback: usize,
    config: &AnalysisConfig,
) -> OrderBlockScan {
    let len = series.len();
    let candles_analyzed = len.saturating_sub(4);
    if len < 5 {
        return OrderBlockScan {
            zones: Vec::new(),
            candles_analyzed,
        };
    }

    let vol_sum_3 = series.vol_sum_3();
    let start = cmp::max(3, len.saturating_sub(lookback));
    let mut zones = Vec::new();

    for i in start..=len - 2 {
        let prev_mean = series.volumes[i - 3..i].iter().mean();
        let volume = series.volumes[i];
        let high_vol = volume > prev_mean * config.order_blocks.volume_floor_multiplier;
        if !high_vol {
            continue;
        }

        let candle = series.get_candle(i);
        let breakout = series.closes[i + 1] > candle.high;
        if candle.get_type() == CandleType::Bullish && breakout {
            zones.push(OrderBlockZone {
                top: candle.high,
                bottom: candle.low,
                volume: vol_sum_3[i],
                strength: volume.min(prev_mean) / volume.max(prev_mean),
                time_found_ms: candle.open_time_ms,
            });
        }
    }

    OrderBlockScan {
        zones,
        candles_analyzed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;

    /// Build a series from (open, high, low, close) rows with fixed volume
    fn series(rows: &[(f64, f64, f64, f64)], volume: f64) -> CanonicalSeries {
        CanonicalSeries {
            opens: rows.iter().map(|r| r.0).collect(),
            highs: rows.iter().map(|r| r.1).collect(),
            lows: rows.iter().map(|r| r.2).collect(),
            closes: rows.iter().map(|r| r.3).collect(),
            volumes: vec![volume; rows.len()],
            open_times_ms: (0..rows.len() as i64).map(|i| i * 60_000).collect(),
        }
    }

    #[test]
    fn red_candles_never_form_blocks() {
        // Monotonically rising closes, but every candle closes below its
        // open. Breakout and volume conditions hold at every index; the
        // green-body gate alone must reject them all.
        let rows: Vec<(f64, f64, f64, f64)> = (0..20)
            .map(|i| {
                let close = 100.0 + 10.0 * i as f64;
                (close + 5.0, close + 6.0, close - 1.0, close)
            })
            .collect();
        for (i, row) in rows.iter().enumerate().skip(1) {
            assert!(
                row.3 > rows[i - 1].1,
                "test setup: each close must break the previous high"
            );
        }
        let scan = detect(&series(&rows, 50.0), 150, &ANALYSIS);
        assert!(scan.zones.is_empty(), "red candles must not emit zones");
        assert_eq!(scan.candles_analyzed, 16);
    }

    #[test]
    fn green_breakout_with_volume_forms_block() {
        // Flat tape, then a green surge at index 5 broken out by index 6
        let mut rows = vec![(100.0, 101.0, 99.0, 100.0); 5];
        rows.push((100.0, 110.0, 99.0, 108.0)); // green accumulation candle
        rows.push((108.0, 120.0, 107.0, 115.0)); // closes above 110
        rows.push((115.0, 116.0, 113.0, 114.0));
        let scan = detect(&series(&rows, 50.0), 150, &ANALYSIS);
        assert_eq!(scan.zones.len(), 1);
        let zone = &scan.zones[0];
        assert_eq!(zone.top, 110.0);
        assert_eq!(zone.bottom, 99.0);
        assert_eq!(zone.volume, 150.0, "zone carries the 3-candle volume sum");
        assert!((zone.strength - 1.0).abs() < 1e-9, "uniform volume gives full strength");
        assert_eq!(zone.time_found_ms, 5 * 60_000);
    }

    #[test]
    fn strength_reflects_volume_imbalance() {
        let mut rows = vec![(100.0, 101.0, 99.0, 100.0); 5];
        rows.push((100.0, 110.0, 99.0, 108.0));
        rows.push((108.0, 120.0, 107.0, 115.0));
        let mut s = series(&rows, 10.0);
        s.volumes[5] = 40.0; // candidate volume 4x the preceding mean
        let scan = detect(&s, 150, &ANALYSIS);
        assert_eq!(scan.zones.len(), 1);
        assert!((scan.zones[0].strength - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_volume_candidate_is_skipped() {
        let mut rows = vec![(100.0, 101.0, 99.0, 100.0); 5];
        rows.push((100.0, 110.0, 99.0, 108.0));
        rows.push((108.0, 120.0, 107.0, 115.0));
        let mut s = series(&rows, 10.0);
        s.volumes[5] = 0.0; // 0 > prev_mean * 0.1 fails
        let scan = detect(&s, 150, &ANALYSIS);
        assert!(scan.zones.is_empty());
    }

    #[test]
    fn lookback_limits_the_scan_window() {
        // Qualifying pattern early in a long series, outside a short lookback
        let mut rows = vec![(100.0, 101.0, 99.0, 100.0); 5];
        rows.push((100.0, 110.0, 99.0, 108.0));
        rows.push((108.0, 120.0, 107.0, 115.0));
        rows.extend(vec![(115.0, 116.0, 113.0, 114.0); 40]);
        let full = detect(&series(&rows, 50.0), 150, &ANALYSIS);
        assert_eq!(full.zones.len(), 1);
        let windowed = detect(&series(&rows, 50.0), 10, &ANALYSIS);
        assert!(
            windowed.zones.is_empty(),
            "pattern at index 5 is outside a 10-candle lookback"
        );
    }

    #[test]
    fn tiny_series_reports_no_zones() {
        let rows = vec![(100.0, 101.0, 99.0, 100.5); 4];
        let scan = detect(&series(&rows, 10.0), 150, &ANALYSIS);
        assert!(scan.zones.is_empty());
        assert_eq!(scan.candles_analyzed, 0);
    }
}
