use serde::{Deserialize, Serialize};

use crate::models::cluster::ClusterResult;
use crate::utils::maths_utils::relative_distance;

/// Which side of price a level sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
pub enum ZoneKind {
    Support,
    Resistance,
}

/// Final support/resistance levels for one token.
/// Strength = fraction of the input extrema that agreed with the final mean.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ZonePair {
    pub support: ClusterResult,
    pub resistance: ClusterResult,
    pub support_strength: f64,
    pub resistance_strength: f64,
}

/// A price band associated with one high-traded-volume candle
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VolumeRange {
    pub low: f64,
    pub high: f64,
    pub volume: f64,
}

impl VolumeRange {
    /// Both edges must agree within `tolerance` for two ranges to be
    /// considered the same band.
    pub fn is_near_duplicate(&self, other: &VolumeRange, tolerance: f64) -> bool {
        relative_distance(self.low, other.low) <= tolerance
            && relative_distance(self.high, other.high) <= tolerance
    }
}

/// A volume-confirmed accumulation candle whose high was broken by the next
/// candle. Appended to a caller-owned active list; expiry is caller policy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderBlockZone {
    pub top: f64,
    pub bottom: f64,
    pub volume: f64,
    /// min/max ratio of the candle's volume vs the preceding mean, in (0, 1]
    pub strength: f64,
    pub time_found_ms: i64,
}

impl OrderBlockZone {
    /// Whether the current market cap sits inside the zone, with `tolerance`
    /// slack applied to both the zone edge and the price on each side.
    pub fn is_entered(&self, marketcap: f64, tolerance: f64) -> bool {
        let below_ok = marketcap * (1.0 + tolerance) >= self.bottom * (1.0 - tolerance);
        let above_ok = marketcap * (1.0 - tolerance) <= self.top * (1.0 + tolerance);
        below_ok && above_ok
    }

    /// Same shape of edge test as `VolumeRange::is_near_duplicate`, but run
    /// with the much tighter active-zone tolerance.
    pub fn is_near_duplicate(&self, other: &OrderBlockZone, tolerance: f64) -> bool {
        relative_distance(self.top, other.top) <= tolerance
            && relative_distance(self.bottom, other.bottom) <= tolerance
    }
}
