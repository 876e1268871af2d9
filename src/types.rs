//! Core data types used across the trading system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLC candlestick data for one fixed time granularity.
///
/// Timestamps are stored in UTC and converted to the venue timezone where a
/// session calculation needs it. Volume is optional because some bridge
/// feeds only relay tick counts. The usual OHLC ordering invariant
/// (high >= max(open, close), low <= min(open, close)) is assumed, not
/// validated: malformed candles are the feed's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Candle {
    /// Absolute size of the candle body.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-to-low span of the candle.
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// True if the candle closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Trading instrument symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Symbol(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Breakout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

/// Session opening range, derived once per evaluation from the coarse
/// candles covering the session window. Immutable after construction and
/// never persisted; every run recomputes it from fresh data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub high: f64,
    pub low: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Range {
    /// High-to-low width of the range.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// A fully priced pending-order candidate.
///
/// Built once per qualifying breakout, consumed exactly once by order
/// placement, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCandidate {
    pub direction: Direction,
    pub entry: f64,
    pub sl: f64,
    pub tp: f64,
    pub volume: f64,
    /// Strategy-identifying tag carried on the venue order.
    pub magic: i64,
}

/// Outcome of submitting a pending order to the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderResult {
    /// Order is resting at the venue under the given identifier.
    Accepted { order_id: String },
    /// Venue declined the order.
    Rejected { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            datetime: Utc::now(),
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    #[test]
    fn test_candle_body_and_span() {
        let c = candle(1996.0, 2001.2, 1995.8, 2001.0);
        assert!((c.body() - 5.0).abs() < 1e-9);
        assert!((c.span() - 5.4).abs() < 1e-9);
        assert!(c.is_bullish());
    }

    #[test]
    fn test_bearish_candle() {
        let c = candle(2001.0, 2001.2, 1995.8, 1996.0);
        assert!(!c.is_bullish());
        assert!((c.body() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_width() {
        let range = Range {
            high: 2000.0,
            low: 1995.0,
            start: Utc::now(),
            end: Utc::now(),
        };
        assert!((range.width() - 5.0).abs() < 1e-9);
    }
}
