//! Paper order gateway.
//!
//! Accepts every candidate without talking to the venue, so a full
//! evaluation can be rehearsed against live market data with no order at
//! risk. Market data and history still come from the real bridge.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::types::{OrderCandidate, OrderResult, Symbol};
use crate::venue::{OrderGateway, VenueResult};

static PAPER_ORDER_ID: AtomicU64 = AtomicU64::new(1);

/// Gateway that records the order instead of submitting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaperGateway;

impl PaperGateway {
    pub fn new() -> Self {
        Self
    }
}

impl OrderGateway for PaperGateway {
    async fn place_pending_order(
        &self,
        symbol: &Symbol,
        candidate: &OrderCandidate,
    ) -> VenueResult<OrderResult> {
        let order_id = format!("paper-{}", PAPER_ORDER_ID.fetch_add(1, Ordering::Relaxed));
        info!(
            symbol = %symbol,
            direction = %candidate.direction,
            entry = candidate.entry,
            sl = candidate.sl,
            tp = candidate.tp,
            volume = candidate.volume,
            order_id = %order_id,
            "[PAPER] pending order accepted"
        );
        Ok(OrderResult::Accepted { order_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[tokio::test]
    async fn test_paper_gateway_accepts_with_unique_ids() {
        let gateway = PaperGateway::new();
        let symbol = Symbol::new("XAUUSD");
        let candidate = OrderCandidate {
            direction: Direction::Long,
            entry: 1998.5,
            sl: 1995.8,
            tp: 2058.455,
            volume: 0.1,
            magic: 123_456,
        };

        let first = gateway.place_pending_order(&symbol, &candidate).await.unwrap();
        let second = gateway.place_pending_order(&symbol, &candidate).await.unwrap();

        let (OrderResult::Accepted { order_id: a }, OrderResult::Accepted { order_id: b }) =
            (first, second)
        else {
            panic!("paper gateway should always accept");
        };
        assert_ne!(a, b);
    }
}
