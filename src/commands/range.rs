//! Range Command
//!
//! Diagnostic: resolve and print today's session range from live coarse
//! candles without evaluating a breakout or placing anything.

use anyhow::{Context, Result};
use tracing::info;

use orb_trader::config::Config;
use orb_trader::session::{resolve_range, SessionWindow};
use orb_trader::venue::{BridgeClient, MarketData};

pub fn run(config_path: String) -> Result<()> {
    dotenv::dotenv().ok();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_async(config_path))
}

async fn run_async(config_path: String) -> Result<()> {
    let config = Config::from_file(&config_path)
        .context(format!("Failed to load config from {}", config_path))?;
    let strategy = &config.strategy;

    let bridge = BridgeClient::from_config(&config.venue)?;
    let window = SessionWindow::from_config(strategy)?;

    let candles = bridge
        .get_candles(
            &strategy.symbol(),
            &strategy.range_timeframe,
            strategy.range_history,
        )
        .await
        .context("Failed to fetch coarse candles")?;

    let range = resolve_range(&candles, &window, strategy.aggregate_range_bars)?;

    info!(
        symbol = %strategy.symbol,
        high = range.high,
        low = range.low,
        width = range.width(),
        start = %range.start,
        end = %range.end,
        "Session range"
    );

    Ok(())
}
