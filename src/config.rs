//! Configuration management
//!
//! Handles loading and parsing of JSON configuration files with environment
//! variable support for bridge API credentials.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Symbol;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub venue: VenueConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let mut config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;

        // Load API credentials from environment if not set
        if let Ok(api_key) = std::env::var("BRIDGE_API_KEY") {
            config.venue.api_key = Some(api_key);
        }
        if let Ok(api_secret) = std::env::var("BRIDGE_API_SECRET") {
            config.venue.api_secret = Some(api_secret);
        }

        config.strategy.validate()?;
        Ok(config)
    }
}

/// Terminal bridge connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for VenueConfig {
    fn default() -> Self {
        VenueConfig {
            base_url: "http://127.0.0.1:6542".to_string(),
            api_key: None,
            api_secret: None,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// Strategy parameters for one evaluation pass.
///
/// Immutable for the duration of an evaluation; owned by the orchestrator
/// and passed by reference to every component that needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Instrument to trade
    pub symbol: String,
    /// Venue trading calendar timezone (IANA name)
    pub timezone: String,
    /// Local session open, "HH:MM"
    pub session_time: String,
    /// Length of the opening-range window in minutes
    pub range_minutes: i64,
    /// Coarse granularity used to mark the range
    pub range_timeframe: String,
    /// Fine granularity watched for the breakout
    pub confirm_timeframe: String,
    /// How many coarse candles to fetch
    pub range_history: usize,
    /// How many fine candles to fetch
    pub confirm_history: usize,
    /// Minimum body-to-span ratio for a breakout candle
    pub strong_body_min_pct: f64,
    /// Minimum open displacement from the broken edge, as a fraction of the
    /// range width
    pub open_away_from_edge_pct: f64,
    /// Confirmation candles allowed after the first examined one
    pub confirm_bars_max: usize,
    /// Take-profit distance as a fraction of the entry price
    pub tp_pct: f64,
    /// Fraction of the entry-to-target distance at which a separate
    /// monitoring process would move the stop to breakeven. Not consulted
    /// by the single-pass decision core.
    pub move_to_be_at: f64,
    /// Daily cap enforced by the trade gate
    pub max_trades_per_day: usize,
    /// Price value of one pip for the instrument
    pub pip_size: f64,
    /// Below this stop distance (in pips) the range edge is used instead
    pub min_alt_sl_pips: u32,
    /// Lot size, used verbatim for the order
    pub volume: f64,
    /// Strategy tag carried on venue orders
    pub magic: i64,
    /// Fold max(high)/min(low) over every covered coarse candle instead of
    /// using only the first one
    pub aggregate_range_bars: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            symbol: "XAUUSD".to_string(),
            timezone: "America/Santiago".to_string(),
            session_time: "09:30".to_string(),
            range_minutes: 15,
            range_timeframe: "15m".to_string(),
            confirm_timeframe: "5m".to_string(),
            range_history: 200,
            confirm_history: 1000,
            strong_body_min_pct: 0.60,
            open_away_from_edge_pct: 0.20,
            confirm_bars_max: 2,
            tp_pct: 0.03,
            move_to_be_at: 0.5,
            max_trades_per_day: 1,
            pip_size: 0.01,
            min_alt_sl_pips: 5,
            volume: 0.1,
            magic: 123_456,
            aggregate_range_bars: false,
        }
    }
}

impl StrategyConfig {
    pub fn symbol(&self) -> Symbol {
        Symbol::new(self.symbol.clone())
    }

    /// Parse the configured venue timezone.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }

    /// Parse the configured local session open time.
    pub fn session_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.session_time, "%H:%M")
            .with_context(|| format!("Invalid session_time '{}'", self.session_time))
    }

    /// Check that the parameters describe a usable strategy.
    pub fn validate(&self) -> Result<()> {
        self.timezone()?;
        self.session_time()?;
        anyhow::ensure!(self.range_minutes > 0, "range_minutes must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.strong_body_min_pct),
            "strong_body_min_pct must be within [0, 1]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.open_away_from_edge_pct),
            "open_away_from_edge_pct must be within [0, 1]"
        );
        anyhow::ensure!(self.tp_pct > 0.0, "tp_pct must be positive");
        anyhow::ensure!(self.pip_size > 0.0, "pip_size must be positive");
        anyhow::ensure!(self.volume > 0.0, "volume must be positive");
        Ok(())
    }
}
