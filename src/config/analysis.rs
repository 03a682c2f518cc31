//! Analysis and computation configuration
//!
//! Every threshold in the detection pipeline was tuned empirically against
//! live memecoin feeds. They are collected here rather than scattered inline
//! so a caller can see (and eventually override) the knobs in one place.

/// Settings for local peak/trough detection
#[derive(Debug, Clone)]
pub struct ExtremaSettings {
    // Prominence floor, as a fraction of the full observed price range.
    // Wiggles smaller than this are noise, not structure.
    pub min_prominence_pct: f64,
    // Minimum horizontal separation (in candles) between accepted extrema
    pub min_distance: usize,
    // Minimum width of an extremum in candles
    pub min_width: usize,
}

/// Settings for grouping extrema into a consensus level
#[derive(Debug, Clone)]
pub struct ClusterSettings {
    // Relative distance from the mean within which a level counts as "similar"
    pub similarity_pct: f64,
    // Fraction of levels that must be similar for a high-confidence cluster
    pub majority_fraction: f64,
    // Band half-widths. Tight = real consensus, wide = zone inferred by elimination.
    pub tight_band_pct: f64,
    pub default_band_pct: f64,
    pub wide_band_pct: f64,
    // Relative distance to the opposing cluster mean below which the two
    // clusters are considered close together
    pub separation_pct: f64,
}

/// Settings for resolving final support/resistance levels
#[derive(Debug, Clone)]
pub struct ZoneSettings {
    // Band around the all-time high when no resistance cluster forms
    pub ath_band_pct: f64,
    // Band around the plain trough mean when clustered support is rejected
    pub support_fallback_band_pct: f64,
    // Clustered support is only actionable below this fraction of the
    // current market cap
    pub support_actionable_fraction: f64,
    // Extrema within this relative distance of the final mean count
    // towards the level's strength
    pub strength_similarity_pct: f64,
}

/// Settings for high-volume range detection
#[derive(Debug, Clone)]
pub struct VolumeZoneSettings {
    // Two ranges whose lows AND highs agree within this tolerance are duplicates
    pub dedup_tolerance_pct: f64,
}

/// Settings for bullish order-block detection
#[derive(Debug, Clone)]
pub struct OrderBlockSettings {
    // Only the most recent N candles are scanned
    pub lookback: usize,
    // Candidate volume must exceed prev_mean * this multiplier
    pub volume_floor_multiplier: f64,
    // Entry band on each side when checking whether price entered a zone
    pub entry_tolerance_pct: f64,
    // Newly found zones within this tolerance of an active zone are duplicates.
    // Deliberately much tighter than the volume-range tolerance above.
    pub dedup_tolerance_pct: f64,
}

/// Settings for the caller-side recompute debounce
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    // Minimum window between full analysis passes for the same token
    pub min_seconds_between_recalcs: u64,
    // Market-cap move (fractional) that forces a recompute inside the window
    pub marketcap_recalc_threshold_pct: f64,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub extrema: ExtremaSettings,
    pub cluster: ClusterSettings,
    pub zones: ZoneSettings,
    pub volume_zones: VolumeZoneSettings,
    pub order_blocks: OrderBlockSettings,
    pub monitor: MonitorSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    extrema: ExtremaSettings {
        min_prominence_pct: 0.01,
        min_distance: 2,
        min_width: 1,
    },

    cluster: ClusterSettings {
        similarity_pct: 0.30,
        majority_fraction: 0.5,
        tight_band_pct: 0.03,
        default_band_pct: 0.05,
        wide_band_pct: 0.10,
        separation_pct: 0.50,
    },

    zones: ZoneSettings {
        ath_band_pct: 0.10,
        support_fallback_band_pct: 0.03,
        support_actionable_fraction: 0.30,
        strength_similarity_pct: 0.30,
    },

    volume_zones: VolumeZoneSettings {
        dedup_tolerance_pct: 0.20,
    },

    order_blocks: OrderBlockSettings {
        lookback: 150,
        volume_floor_multiplier: 0.1,
        entry_tolerance_pct: 0.02,
        dedup_tolerance_pct: 0.01,
    },

    monitor: MonitorSettings {
        min_seconds_between_recalcs: 120,
        marketcap_recalc_threshold_pct: 0.01,
    },
};
