use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::Value;

use crate::analysis::{order_blocks, volume_zones, zones};
use crate::config::AnalysisConfig;
use crate::data::normalize;
use crate::engine::cache::AnalysisCache;
use crate::models::{OrderBlockZone, TokenModel};

/// Per-token engine state.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    /// THE FRONT BUFFER. Readers grab this Arc; publishing a new model is a
    /// pointer swap, never an in-place mutation.
    pub model: Option<Arc<TokenModel>>,

    /// Active order-block zones. Detection only ever appends here (after
    /// dedup); removal and expiry are this layer's policy, not detection's.
    pub active_blocks: Vec<OrderBlockZone>,

    /// Last error (if any) for display/telemetry
    pub last_error: Option<String>,
}

impl TokenState {
    fn publish(&mut self, model: Arc<TokenModel>) {
        self.model = Some(model);
        self.last_error = None;
    }
}

/// One unit of batch work: everything the pure pipeline needs for a token
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub mint: String,
    pub payload: Value,
    pub supply: f64,
    pub marketcap: f64,
}

/// Drives the pure analysis pipeline across many tokens and owns everything
/// the pipeline must not: the recompute debounce, the active order-block
/// lists, and the published models.
pub struct TokenMonitor {
    states: HashMap<String, TokenState>,
    cache: AnalysisCache,
    config: AnalysisConfig,
}

impl TokenMonitor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            states: HashMap::new(),
            cache: AnalysisCache::new(),
            config,
        }
    }

    /// Run the full pipeline for one token and publish the result.
    ///
    /// Returns `Ok(None)` when the debounce suppressed the run. Normalization
    /// failures are recorded on the token's state and bubbled up so the
    /// caller can retry with a different timeframe or data source.
    pub fn analyze_token(
        &mut self,
        mint: &str,
        payload: &Value,
        supply: f64,
        marketcap: f64,
        now_ms: i64,
    ) -> Result<Option<Arc<TokenModel>>> {
        if !self
            .cache
            .should_analyze(mint, now_ms, marketcap, &self.config.monitor)
        {
            log::debug!("[{}] debounced, skipping analysis", mint);
            return Ok(None);
        }

        match run_pipeline(mint, payload, supply, marketcap, now_ms, &self.config) {
            Ok(model) => {
                self.cache.record(mint, now_ms, marketcap);
                Ok(Some(self.apply_model(mint, model)))
            }
            Err(e) => {
                let state = self.states.entry(mint.to_string()).or_default();
                state.last_error = Some(e.to_string());
                log::error!("[{}] analysis failed: {}", mint, e);
                Err(e)
            }
        }
    }

    /// Fan the pure stage out across tokens, then apply results serially.
    /// One writer per token key: the parallel section touches no state.
    pub fn analyze_batch(
        &mut self,
        jobs: Vec<AnalysisJob>,
        now_ms: i64,
    ) -> Vec<(String, Result<Arc<TokenModel>>)> {
        let due: Vec<AnalysisJob> = jobs
            .into_iter()
            .filter(|job| {
                self.cache
                    .should_analyze(&job.mint, now_ms, job.marketcap, &self.config.monitor)
            })
            .collect();

        let config = &self.config;
        let computed: Vec<(AnalysisJob, Result<TokenModel>)> = due
            .into_par_iter()
            .map(|job| {
                let result = run_pipeline(
                    &job.mint,
                    &job.payload,
                    job.supply,
                    job.marketcap,
                    now_ms,
                    config,
                );
                (job, result)
            })
            .collect();

        computed
            .into_iter()
            .map(|(job, result)| match result {
                Ok(model) => {
                    self.cache.record(&job.mint, now_ms, job.marketcap);
                    let published = self.apply_model(&job.mint, model);
                    (job.mint, Ok(published))
                }
                Err(e) => {
                    let state = self.states.entry(job.mint.clone()).or_default();
                    state.last_error = Some(e.to_string());
                    (job.mint, Err(e))
                }
            })
            .collect()
    }

    /// Active order blocks the current market cap has entered
    pub fn entered_blocks(&self, mint: &str, marketcap: f64) -> Vec<&OrderBlockZone> {
        let tolerance = self.config.order_blocks.entry_tolerance_pct;
        self.states
            .get(mint)
            .map(|state| {
                state
                    .active_blocks
                    .iter()
                    .filter(|zone| zone.is_entered(marketcap, tolerance))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_model(&self, mint: &str) -> Option<Arc<TokenModel>> {
        self.states.get(mint).and_then(|state| state.model.clone())
    }

    pub fn active_blocks(&self, mint: &str) -> &[OrderBlockZone] {
        self.states
            .get(mint)
            .map(|state| state.active_blocks.as_slice())
            .unwrap_or(&[])
    }

    /// Drop active blocks found before `cutoff_ms`. Expiry is deliberately a
    /// monitor-level call so detection stays append-only.
    pub fn expire_blocks_before(&mut self, mint: &str, cutoff_ms: i64) {
        if let Some(state) = self.states.get_mut(mint) {
            state.active_blocks.retain(|zone| zone.time_found_ms >= cutoff_ms);
        }
    }

    pub fn token_count(&self) -> usize {
        self.states.len()
    }

    pub fn last_error(&self, mint: &str) -> Option<String> {
        self.states.get(mint).and_then(|state| state.last_error.clone())
    }

    /// Publish the model and fold its freshly found order blocks into the
    /// active list, skipping near-duplicates of zones already being tracked.
    fn apply_model(&mut self, mint: &str, model: TokenModel) -> Arc<TokenModel> {
        let tolerance = self.config.order_blocks.dedup_tolerance_pct;
        let state = self.states.entry(mint.to_string()).or_default();

        for zone in &model.order_blocks {
            let already_tracked = state
                .active_blocks
                .iter()
                .any(|existing| zone.is_near_duplicate(existing, tolerance));
            if !already_tracked {
                state.active_blocks.push(zone.clone());
            }
        }

        let published = Arc::new(model);
        state.publish(Arc::clone(&published));
        published
    }
}

/// The pure pipeline: payload in, model out. No monitor state involved.
fn run_pipeline(
    mint: &str,
    payload: &Value,
    supply: f64,
    marketcap: f64,
    now_ms: i64,
    config: &AnalysisConfig,
) -> Result<TokenModel> {
    let series = normalize::normalize(payload, supply)
        .with_context(|| format!("normalizing series for {}", mint))?;

    let zone_pair = zones::resolve(&series, marketcap, config);
    let volume_ranges = volume_zones::find(&series, config);
    let scan = order_blocks::detect(&series, config.order_blocks.lookback, config);

    log::info!(
        "[{}] analyzed {} candles: zones={}, volume_ranges={}, order_blocks={}",
        mint,
        series.len(),
        zone_pair.is_some(),
        volume_ranges.len(),
        scan.zones.len()
    );

    Ok(TokenModel {
        mint: mint.to_string(),
        marketcap,
        zones: zone_pair,
        volume_ranges,
        order_blocks: scan.zones,
        candles_analyzed: scan.candles_analyzed,
        analyzed_at_ms: now_ms,
    })
}
