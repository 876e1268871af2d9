//! Venue collaborator contracts.
//!
//! The decision core talks to its environment through three narrow traits:
//! market data, execution history, and pending-order placement. The
//! orchestrator is generic over them, so live runs use the terminal bridge
//! while tests and paper mode substitute their own implementations.

pub mod bridge;
pub mod paper;

use thiserror::Error;

use crate::types::{Candle, OrderCandidate, OrderResult, Symbol};

pub use bridge::{BridgeClient, BridgeConfig};
pub use paper::PaperGateway;

/// Venue-side failures, kept separate from the strategy error taxonomy so
/// the orchestrator can map them onto the right phase of the pass.
#[derive(Debug, Error)]
pub enum VenueError {
    #[error("bridge API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("auth error: {0}")]
    Auth(String),
}

pub type VenueResult<T> = Result<T, VenueError>;

/// Supplies OHLC candles, oldest first.
#[allow(async_fn_in_trait)]
pub trait MarketData {
    async fn get_candles(
        &self,
        symbol: &Symbol,
        timeframe: &str,
        count: usize,
    ) -> VenueResult<Vec<Candle>>;
}

/// Counts trades already executed today in the venue's trading calendar.
#[allow(async_fn_in_trait)]
pub trait TradeHistory {
    async fn count_trades_today(&self, symbol: &Symbol) -> VenueResult<usize>;
}

/// Places one resting pending order at the candidate's entry price.
#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    async fn place_pending_order(
        &self,
        symbol: &Symbol,
        candidate: &OrderCandidate,
    ) -> VenueResult<OrderResult>;
}
