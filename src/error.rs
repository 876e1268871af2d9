//! Error taxonomy for one evaluation pass.
//!
//! Only genuine failures live here. "No breakout today" and "gate blocked"
//! are ordinary terminal outcomes and are reported through
//! [`crate::orchestrator::Outcome`] instead.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures that abort the current evaluation pass.
///
/// The core performs no retries; every failure surfaces to the invoking
/// scheduler as-is.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// No coarse candle covered the session window in the supplied data.
    #[error("no session candle covering {start}..{end} in supplied data")]
    RangeNotFound {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A collaborator could not supply candles or trade history.
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// The order gateway failed while submitting the pending order.
    #[error("order gateway failed: {0}")]
    GatewayRejected(String),
}
