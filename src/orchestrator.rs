//! One-shot strategy evaluation.
//!
//! A single invocation walks the whole decision chain: fetch candles,
//! resolve the session range, hunt for a breakout candle, price the order
//! candidate, consult the daily trade gate, and finally hand the candidate
//! to the order gateway. Each run recomputes everything from freshly
//! fetched data; nothing is cached across invocations and no side effect
//! happens before the final placement step.

use crate::breakout::find_breakout;
use crate::candidate::build_candidate;
use crate::config::StrategyConfig;
use crate::error::StrategyError;
use crate::events::{EventSink, StrategyEvent};
use crate::gate::may_place_order;
use crate::session::{resolve_range, SessionWindow};
use crate::types::{OrderCandidate, OrderResult};
use crate::venue::{MarketData, OrderGateway, TradeHistory, VenueError};

/// Terminal state of one evaluation pass.
///
/// Only genuine failures become [`StrategyError`]; a quiet day or a blocked
/// gate is a normal outcome and must stay distinguishable from one.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The candidate is resting at the venue.
    OrderPlaced {
        candidate: OrderCandidate,
        order_id: String,
    },
    /// The venue declined the candidate. Not retried.
    OrderRejected {
        candidate: OrderCandidate,
        reason: String,
    },
    /// No candle qualified within the confirmation budget.
    NoBreakout,
    /// The daily trade cap was already reached.
    GateBlocked { trades_today: usize },
}

/// Composes the decision core with its venue collaborators and event sink.
pub struct Orchestrator<M, H, G, S> {
    config: StrategyConfig,
    window: SessionWindow,
    market: M,
    history: H,
    gateway: G,
    sink: S,
}

impl<M, H, G, S> Orchestrator<M, H, G, S>
where
    M: MarketData,
    H: TradeHistory,
    G: OrderGateway,
    S: EventSink,
{
    pub fn new(
        config: StrategyConfig,
        market: M,
        history: H,
        gateway: G,
        sink: S,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let window = SessionWindow::from_config(&config)?;
        Ok(Self {
            config,
            window,
            market,
            history,
            gateway,
            sink,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run exactly one evaluation pass.
    pub async fn evaluate(&self) -> Result<Outcome, StrategyError> {
        let symbol = self.config.symbol();

        let coarse = self
            .market
            .get_candles(&symbol, &self.config.range_timeframe, self.config.range_history)
            .await
            .map_err(data_unavailable)?;
        let fine = self
            .market
            .get_candles(
                &symbol,
                &self.config.confirm_timeframe,
                self.config.confirm_history,
            )
            .await
            .map_err(data_unavailable)?;

        let range = resolve_range(&coarse, &self.window, self.config.aggregate_range_bars)?;
        self.sink.emit(StrategyEvent::RangeResolved {
            range: range.clone(),
        });

        let Some((breakout, direction)) = find_breakout(&fine, &range, &self.config) else {
            self.sink.emit(StrategyEvent::NoBreakout);
            return Ok(Outcome::NoBreakout);
        };
        self.sink.emit(StrategyEvent::BreakoutFound {
            at: breakout.datetime,
            direction,
        });

        let candidate = build_candidate(breakout, direction, &range, &self.config);
        self.sink.emit(StrategyEvent::CandidateBuilt {
            candidate: candidate.clone(),
        });

        let trades_today = self
            .history
            .count_trades_today(&symbol)
            .await
            .map_err(data_unavailable)?;
        if !may_place_order(trades_today, self.config.max_trades_per_day) {
            self.sink.emit(StrategyEvent::GateBlocked {
                trades_today,
                max_trades_per_day: self.config.max_trades_per_day,
            });
            return Ok(Outcome::GateBlocked { trades_today });
        }

        match self.gateway.place_pending_order(&symbol, &candidate).await {
            Ok(OrderResult::Accepted { order_id }) => {
                self.sink.emit(StrategyEvent::OrderPlaced {
                    order_id: order_id.clone(),
                });
                Ok(Outcome::OrderPlaced {
                    candidate,
                    order_id,
                })
            }
            Ok(OrderResult::Rejected { reason }) => {
                self.sink.emit(StrategyEvent::OrderRejected {
                    reason: reason.clone(),
                });
                Ok(Outcome::OrderRejected { candidate, reason })
            }
            Err(e) => Err(StrategyError::GatewayRejected(e.to_string())),
        }
    }
}

fn data_unavailable(e: VenueError) -> StrategyError {
    StrategyError::DataUnavailable(e.to_string())
}
