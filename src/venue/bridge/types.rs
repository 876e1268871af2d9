//! Wire types for the terminal bridge API.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Candle, Direction, OrderCandidate};

/// Raw candle as returned by `GET /candles`, timestamped in epoch seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub tick_volume: Option<f64>,
}

impl BridgeCandle {
    /// Convert into the core candle type. Returns `None` for an
    /// out-of-range epoch timestamp.
    pub fn into_candle(self) -> Option<Candle> {
        let datetime = Utc.timestamp_opt(self.time, 0).single()?;
        Some(Candle {
            datetime,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.tick_volume,
        })
    }
}

/// Pending order kind accepted by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingOrderKind {
    BuyLimit,
    SellLimit,
}

impl From<Direction> for PendingOrderKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Long => PendingOrderKind::BuyLimit,
            Direction::Short => PendingOrderKind::SellLimit,
        }
    }
}

/// Maximum allowed price deviation, in points.
const DEVIATION_POINTS: u32 = 20;

/// Comment attached to every order this system places.
const ORDER_COMMENT: &str = "orb-trader";

/// Body of `POST /orders`, mirroring the terminal's pending-order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOrderRequest {
    pub symbol: String,
    pub kind: PendingOrderKind,
    pub price: f64,
    pub sl: f64,
    pub tp: f64,
    pub volume: f64,
    pub magic: i64,
    pub deviation: u32,
    pub comment: String,
    /// Good-till-cancelled
    pub time_in_force: String,
    /// Fill-or-kill
    pub filling: String,
}

impl PendingOrderRequest {
    pub fn from_candidate(symbol: &str, candidate: &OrderCandidate) -> Self {
        PendingOrderRequest {
            symbol: symbol.to_string(),
            kind: candidate.direction.into(),
            price: candidate.entry,
            sl: candidate.sl,
            tp: candidate.tp,
            volume: candidate.volume,
            magic: candidate.magic,
            deviation: DEVIATION_POINTS,
            comment: ORDER_COMMENT.to_string(),
            time_in_force: "GTC".to_string(),
            filling: "FOK".to_string(),
        }
    }
}

/// Terminal retcode for an order accepted and resting.
pub const RETCODE_PLACED: i32 = 10008;
/// Terminal retcode for a request completed outright.
pub const RETCODE_DONE: i32 = 10009;

/// Response of `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingOrderResponse {
    pub retcode: i32,
    #[serde(default)]
    pub order: Option<u64>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl PendingOrderResponse {
    pub fn is_accepted(&self) -> bool {
        matches!(self.retcode, RETCODE_PLACED | RETCODE_DONE)
    }
}

/// Response of `GET /history/deals/count`.
#[derive(Debug, Clone, Deserialize)]
pub struct DealCountResponse {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_candle_conversion() {
        let raw = BridgeCandle {
            time: 1_705_322_000,
            open: 2000.0,
            high: 2001.0,
            low: 1999.0,
            close: 2000.5,
            tick_volume: Some(420.0),
        };
        let candle = raw.into_candle().unwrap();
        assert_eq!(candle.datetime.timestamp(), 1_705_322_000);
        assert_eq!(candle.volume, Some(420.0));
    }

    #[test]
    fn test_direction_maps_to_limit_kind() {
        assert_eq!(
            PendingOrderKind::from(Direction::Long),
            PendingOrderKind::BuyLimit
        );
        assert_eq!(
            PendingOrderKind::from(Direction::Short),
            PendingOrderKind::SellLimit
        );
    }

    #[test]
    fn test_request_from_candidate() {
        let candidate = OrderCandidate {
            direction: Direction::Short,
            entry: 1996.5,
            sl: 1999.2,
            tp: 1936.6,
            volume: 0.1,
            magic: 123_456,
        };
        let request = PendingOrderRequest::from_candidate("XAUUSD", &candidate);
        assert_eq!(request.kind, PendingOrderKind::SellLimit);
        assert_eq!(request.price, 1996.5);
        assert_eq!(request.magic, 123_456);
        assert_eq!(request.time_in_force, "GTC");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["kind"], "sell_limit");
    }

    #[test]
    fn test_retcode_acceptance() {
        let accepted = PendingOrderResponse {
            retcode: RETCODE_PLACED,
            order: Some(7),
            comment: None,
        };
        assert!(accepted.is_accepted());

        let rejected = PendingOrderResponse {
            retcode: 10019, // no money
            order: None,
            comment: Some("No money".to_string()),
        };
        assert!(!rejected.is_accepted());
    }
}
