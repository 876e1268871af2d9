//! Run Command
//!
//! Performs exactly one evaluation pass of the breakout strategy. The pass
//! is triggered externally (cron, scheduler) once per trading day after the
//! session window closes; there is no internal loop.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use orb_trader::config::Config;
use orb_trader::events::TracingSink;
use orb_trader::orchestrator::{Orchestrator, Outcome};
use orb_trader::venue::{BridgeClient, PaperGateway};

pub fn run(config_path: String, paper: bool, live: bool) -> Result<()> {
    if !paper && !live {
        anyhow::bail!("Must specify either --paper or --live mode");
    }

    if live && paper {
        anyhow::bail!("Cannot specify both --paper and --live modes");
    }

    dotenv::dotenv().ok();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run_async(config_path, paper))
}

async fn run_async(config_path: String, paper_mode: bool) -> Result<()> {
    let config = Config::from_file(&config_path)
        .context(format!("Failed to load config from {}", config_path))?;

    let mode_str = if paper_mode { "PAPER" } else { "LIVE" };
    info!(
        mode = mode_str,
        symbol = %config.strategy.symbol,
        session = %config.strategy.session_time,
        timezone = %config.strategy.timezone,
        range_minutes = config.strategy.range_minutes,
        "Starting breakout evaluation"
    );

    if !paper_mode {
        warn!("LIVE TRADING MODE - REAL MONEY AT RISK!");
        warn!("Press Ctrl+C within 10 seconds to abort...");

        for i in (1..=10).rev() {
            info!("Starting in {} seconds...", i);
            sleep(Duration::from_secs(1)).await;
        }
    }

    let bridge = BridgeClient::from_config(&config.venue)?;

    let outcome = if paper_mode {
        Orchestrator::new(
            config.strategy,
            bridge.clone(),
            bridge,
            PaperGateway::new(),
            TracingSink,
        )?
        .evaluate()
        .await?
    } else {
        Orchestrator::new(
            config.strategy,
            bridge.clone(),
            bridge.clone(),
            bridge,
            TracingSink,
        )?
        .evaluate()
        .await?
    };

    report(&outcome);
    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::OrderPlaced {
            candidate,
            order_id,
        } => {
            info!(
                order_id = %order_id,
                direction = %candidate.direction,
                entry = candidate.entry,
                sl = candidate.sl,
                tp = candidate.tp,
                "Evaluation complete: order placed"
            );
        }
        Outcome::OrderRejected { reason, .. } => {
            warn!(reason = %reason, "Evaluation complete: order rejected by venue");
        }
        Outcome::NoBreakout => {
            info!("Evaluation complete: no qualifying breakout today");
        }
        Outcome::GateBlocked { trades_today } => {
            info!(
                trades_today,
                "Evaluation complete: daily trade cap already reached"
            );
        }
    }
}
