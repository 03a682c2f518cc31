use std::fmt;

use serde_json::Value;

use crate::data::payload::{
    self, CLOSE_ALIASES, HIGH_ALIASES, LOW_ALIASES, OPEN_ALIASES, VOLUME_ALIASES,
};
use crate::domain::CanonicalSeries;
use crate::utils::vec_utils;

#[derive(Debug, PartialEq)]
pub enum NormalizeError {
    /// Supply must be a finite positive scalar; it is the price -> market-cap
    /// scale factor and a junk value would poison every level downstream.
    InvalidSupply { supply: f64 },
    /// The payload parsed but carried zero candle rows
    EmptySeries,
    /// No known top-level key held a candle list, or a whole column was
    /// absent under both of its aliases
    MissingColumns { column: &'static str },
    /// A price channel's first row had no usable value: nothing earlier to
    /// fill from, so the series can't be made continuous
    UnprocessableSeries { channel: &'static str },
}

impl std::error::Error for NormalizeError {}
impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizeError::InvalidSupply { supply } => {
                write!(f, "supply must be a finite positive number, got {}", supply)
            }
            NormalizeError::EmptySeries => write!(f, "payload contained zero candles"),
            NormalizeError::MissingColumns { column } => {
                write!(f, "could not locate '{}' under any known alias", column)
            }
            NormalizeError::UnprocessableSeries { channel } => {
                write!(
                    f,
                    "first candle has no usable '{}' value, cannot fill series",
                    channel
                )
            }
        }
    }
}

/// Convert a raw OHLCV payload plus a circulating-supply scalar into a
/// canonical market-cap series.
///
/// Shape detection is first-match-wins over the known payload shapes, row
/// gaps are forward- then backward-filled per price channel, and every price
/// is multiplied by `supply` exactly once. Volume is never scaled.
pub fn normalize(payload: &Value, supply: f64) -> Result<CanonicalSeries, NormalizeError> {
    if !supply.is_finite() || supply <= 0.0 {
        return Err(NormalizeError::InvalidSupply { supply });
    }

    let rows = payload::candle_rows(payload)
        .ok_or(NormalizeError::MissingColumns { column: "candles" })?;
    if rows.is_empty() {
        return Err(NormalizeError::EmptySeries);
    }

    // Column presence is checked across the whole list before touching rows,
    // so "this feed never sends volume" fails loudly instead of zero-filling.
    for (column, aliases) in [
        ("open", &OPEN_ALIASES),
        ("high", &HIGH_ALIASES),
        ("low", &LOW_ALIASES),
        ("close", &CLOSE_ALIASES),
        ("volume", &VOLUME_ALIASES),
    ] {
        if !payload::column_present(rows, aliases) {
            return Err(NormalizeError::MissingColumns { column });
        }
    }

    let mut opens: Vec<Option<f64>> = Vec::with_capacity(rows.len());
    let mut highs: Vec<Option<f64>> = Vec::with_capacity(rows.len());
    let mut lows: Vec<Option<f64>> = Vec::with_capacity(rows.len());
    let mut closes: Vec<Option<f64>> = Vec::with_capacity(rows.len());
    let mut volumes: Vec<f64> = Vec::with_capacity(rows.len());
    let mut open_times_ms: Vec<i64> = Vec::with_capacity(rows.len());

    for row in rows {
        let raw = payload::extract_row(row);
        opens.push(raw.open);
        highs.push(raw.high);
        lows.push(raw.low);
        closes.push(raw.close);
        // A volume gap is just "no trades recorded", not a hole in the tape
        volumes.push(raw.volume.unwrap_or(0.0));
        open_times_ms.push(raw.time_ms.unwrap_or(0));
    }

    for (channel, values) in [
        ("open", &mut opens),
        ("high", &mut highs),
        ("low", &mut lows),
        ("close", &mut closes),
    ] {
        if values[0].is_none() {
            return Err(NormalizeError::UnprocessableSeries { channel });
        }
        vec_utils::fill_gaps_mut(values);
        debug_assert!(
            !vec_utils::has_any_none_elements(values),
            "gap filling left holes in the {} channel",
            channel
        );
    }

    // Price -> market-cap units. This is the only place supply touches the
    // data, which is what keeps repeated pipeline runs from compounding it.
    let scale = |values: Vec<Option<f64>>| -> Vec<f64> {
        values
            .into_iter()
            .map(|v| v.unwrap_or_default() * supply)
            .collect()
    };

    Ok(CanonicalSeries {
        opens: scale(opens),
        highs: scale(highs),
        lows: scale(lows),
        closes: scale(closes),
        volumes,
        open_times_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "ohlcv": [
                {"open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 100.0, "time": 1000},
                {"open": 1.5, "high": 2.5, "low": 1.0, "close": 2.0, "volume": 150.0, "time": 2000},
            ]
        })
    }

    fn abbrev_payload() -> Value {
        json!({
            "result": [
                {"o": 1.0, "h": 2.0, "l": 0.5, "c": 1.5, "v": 100.0, "t": 1000},
                {"o": 1.5, "h": 2.5, "l": 1.0, "c": 2.0, "v": 150.0, "t": 2000},
            ]
        })
    }

    #[test]
    fn equivalent_shapes_normalize_identically() {
        let from_full = normalize(&full_payload(), 1_000_000.0).unwrap();
        let from_abbrev = normalize(&abbrev_payload(), 1_000_000.0).unwrap();
        assert_eq!(from_full.opens, from_abbrev.opens);
        assert_eq!(from_full.highs, from_abbrev.highs);
        assert_eq!(from_full.lows, from_abbrev.lows);
        assert_eq!(from_full.closes, from_abbrev.closes);
        assert_eq!(from_full.volumes, from_abbrev.volumes);
        assert_eq!(from_full.open_times_ms, from_abbrev.open_times_ms);
    }

    #[test]
    fn supply_is_applied_exactly_once() {
        let series = normalize(&full_payload(), 2.0).unwrap();
        // Scale factor must be supply, not supply squared
        assert_eq!(series.opens, vec![2.0, 3.0]);
        assert_eq!(series.highs, vec![4.0, 5.0]);
        // Volume stays in feed units
        assert_eq!(series.volumes, vec![100.0, 150.0]);
    }

    #[test]
    fn rejects_bad_supply() {
        for supply in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = normalize(&full_payload(), supply).unwrap_err();
            assert!(
                matches!(err, NormalizeError::InvalidSupply { .. }),
                "supply {} should be rejected",
                supply
            );
        }
    }

    #[test]
    fn rejects_empty_candle_list() {
        let err = normalize(&json!({"result": []}), 1.0).unwrap_err();
        assert_eq!(err, NormalizeError::EmptySeries);
    }

    #[test]
    fn rejects_unknown_top_level_shape() {
        let err = normalize(&json!({"candles": [{"o": 1.0}]}), 1.0).unwrap_err();
        assert_eq!(err, NormalizeError::MissingColumns { column: "candles" });
    }

    #[test]
    fn rejects_column_missing_from_every_row() {
        let payload = json!({
            "result": [
                {"o": 1.0, "h": 2.0, "l": 0.5, "c": 1.5},
                {"o": 1.5, "h": 2.5, "l": 1.0, "c": 2.0},
            ]
        });
        let err = normalize(&payload, 1.0).unwrap_err();
        assert_eq!(err, NormalizeError::MissingColumns { column: "volume" });
    }

    #[test]
    fn interior_gap_is_forward_filled() {
        let payload = json!({
            "result": [
                {"o": 1.0, "h": 2.0, "l": 0.5, "c": 1.5, "v": 10.0},
                {"o": "junk", "h": 2.5, "l": 1.0, "c": 2.0, "v": 11.0},
                {"o": 3.0, "h": 3.5, "l": 2.0, "c": 3.0, "v": 12.0},
            ]
        });
        let series = normalize(&payload, 1.0).unwrap();
        assert_eq!(series.opens, vec![1.0, 1.0, 3.0]);
    }

    #[test]
    fn unfillable_first_row_is_fatal() {
        let payload = json!({
            "result": [
                {"o": null, "h": 2.0, "l": 0.5, "c": 1.5, "v": 10.0},
                {"o": 1.5, "h": 2.5, "l": 1.0, "c": 2.0, "v": 11.0},
            ]
        });
        let err = normalize(&payload, 1.0).unwrap_err();
        assert_eq!(err, NormalizeError::UnprocessableSeries { channel: "open" });
    }

    #[test]
    fn missing_volume_in_one_row_coerces_to_zero() {
        let payload = json!({
            "result": [
                {"o": 1.0, "h": 2.0, "l": 0.5, "c": 1.5, "v": 10.0},
                {"o": 1.5, "h": 2.5, "l": 1.0, "c": 2.0},
            ]
        });
        let series = normalize(&payload, 1.0).unwrap();
        assert_eq!(series.volumes, vec![10.0, 0.0]);
    }
}
