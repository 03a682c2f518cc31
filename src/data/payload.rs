//! Shape detection for raw OHLCV payloads.
//!
//! Upstream feeds disagree on everything: the key the candle list hides
//! under, full vs single-letter field names, numbers vs numeric strings.
//! Each known shape is tried in a fixed order and the first match wins, so
//! the list below is the complete statement of what we accept.

use serde_json::Value;

/// Top-level keys under which feeds deliver their candle list, tried in order
pub const CANDLE_LIST_KEYS: [&str; 3] = ["result", "ohlcv", "oclhv"];

pub const OPEN_ALIASES: [&str; 2] = ["open", "o"];
pub const HIGH_ALIASES: [&str; 2] = ["high", "h"];
pub const LOW_ALIASES: [&str; 2] = ["low", "l"];
pub const CLOSE_ALIASES: [&str; 2] = ["close", "c"];
pub const VOLUME_ALIASES: [&str; 2] = ["volume", "v"];
pub const TIME_ALIASES: [&str; 3] = ["time", "timestamp", "t"];

/// One candle as pulled out of the raw payload. Gaps (`None`) are repaired
/// later by the normalizer; at this stage we only locate and coerce.
#[derive(Debug, Clone, Default)]
pub struct RawCandleRow {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub time_ms: Option<i64>,
}

/// Locate the candle list inside a payload, first-match-wins over the known
/// top-level keys.
pub fn candle_rows(payload: &Value) -> Option<&Vec<Value>> {
    CANDLE_LIST_KEYS
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_array))
}

/// Coerce a JSON value to a finite f64. Feeds ship numbers and numeric
/// strings interchangeably; anything else is a gap.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn field<'a>(row: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| row.get(alias))
}

/// Whether any row in the list carries the column under any of its aliases.
/// Column presence is a property of the whole list, not of a single row: a
/// row-level gap is fillable, a list-level absence is not.
pub fn column_present(rows: &[Value], aliases: &[&str]) -> bool {
    rows.iter().any(|row| field(row, aliases).is_some())
}

/// Extract one candle row, coercing each located field
pub fn extract_row(row: &Value) -> RawCandleRow {
    RawCandleRow {
        open: field(row, &OPEN_ALIASES).and_then(coerce_numeric),
        high: field(row, &HIGH_ALIASES).and_then(coerce_numeric),
        low: field(row, &LOW_ALIASES).and_then(coerce_numeric),
        close: field(row, &CLOSE_ALIASES).and_then(coerce_numeric),
        volume: field(row, &VOLUME_ALIASES).and_then(coerce_numeric),
        time_ms: field(row, &TIME_ALIASES)
            .and_then(coerce_numeric)
            .map(|t| t as i64),
    }
}
