use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use mcap_zones::{ANALYSIS, Cli, TokenMonitor};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Load the raw payload
    let raw = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("reading payload file {}", args.payload.display()))?;
    let payload: serde_json::Value =
        serde_json::from_str(&raw).context("payload file is not valid JSON")?;

    // D. Run the pipeline
    let mut monitor = TokenMonitor::new(ANALYSIS.clone());
    let now_ms = Utc::now().timestamp_millis();
    let model = monitor
        .analyze_token(&args.mint, &payload, args.supply, args.marketcap, now_ms)?
        .expect("a fresh monitor never debounces the first run");

    // E. Report
    let entered = monitor.entered_blocks(&args.mint, args.marketcap);
    if !entered.is_empty() {
        log::info!(
            "market cap {} is inside {} order block(s)",
            args.marketcap,
            entered.len()
        );
    }
    println!("{}", serde_json::to_string_pretty(model.as_ref())?);

    Ok(())
}
