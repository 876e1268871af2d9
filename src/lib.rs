//! Opening-Range Breakout Trading System
//!
//! A single-instrument, one-trade-per-day session breakout strategy. Each
//! invocation marks the opening range from coarse candles, watches finer
//! candles for a strong breakout, prices a pending limit order, and submits
//! it through a MetaTrader terminal bridge, subject to a daily trade cap.
//!
//! The decision core is pure and synchronous; venue access goes through the
//! [`venue`] traits, so live runs, paper runs, and tests differ only in the
//! collaborators injected into the [`orchestrator::Orchestrator`].
//!
//! # Example
//! ```no_run
//! use orb_trader::config::Config;
//! use orb_trader::events::TracingSink;
//! use orb_trader::orchestrator::Orchestrator;
//! use orb_trader::venue::{BridgeClient, PaperGateway};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_file("configs/xauusd.json")?;
//!     let bridge = BridgeClient::from_config(&config.venue)?;
//!     let orchestrator = Orchestrator::new(
//!         config.strategy,
//!         bridge.clone(),
//!         bridge,
//!         PaperGateway::new(),
//!         TracingSink,
//!     )?;
//!     let outcome = orchestrator.evaluate().await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod breakout;
pub mod candidate;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod orchestrator;
pub mod session;
pub mod types;
pub mod venue;

pub use config::{Config, StrategyConfig};
pub use error::StrategyError;
pub use orchestrator::{Orchestrator, Outcome};
pub use types::*;
