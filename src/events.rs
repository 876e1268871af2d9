//! Structured event reporting for the decision core.
//!
//! The core never touches a global logger. It emits [`StrategyEvent`]s
//! through an [`EventSink`] owned by the caller; the binary injects a
//! tracing-backed sink, tests inject a recording one.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::types::{Direction, OrderCandidate, Range};

/// Everything reportable during one evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyEvent {
    RangeResolved { range: Range },
    BreakoutFound { at: DateTime<Utc>, direction: Direction },
    NoBreakout,
    CandidateBuilt { candidate: OrderCandidate },
    GateBlocked { trades_today: usize, max_trades_per_day: usize },
    OrderPlaced { order_id: String },
    OrderRejected { reason: String },
}

/// Observability collaborator injected into the orchestrator.
pub trait EventSink {
    fn emit(&self, event: StrategyEvent);
}

/// Sink that forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: StrategyEvent) {
        match event {
            StrategyEvent::RangeResolved { range } => {
                tracing::info!(
                    high = range.high,
                    low = range.low,
                    start = %range.start,
                    end = %range.end,
                    "Session range resolved"
                );
            }
            StrategyEvent::BreakoutFound { at, direction } => {
                tracing::info!(at = %at, direction = %direction, "Breakout candle found");
            }
            StrategyEvent::NoBreakout => {
                tracing::info!("No qualifying breakout today");
            }
            StrategyEvent::CandidateBuilt { candidate } => {
                tracing::info!(
                    direction = %candidate.direction,
                    entry = candidate.entry,
                    sl = candidate.sl,
                    tp = candidate.tp,
                    volume = candidate.volume,
                    "Order candidate built"
                );
            }
            StrategyEvent::GateBlocked {
                trades_today,
                max_trades_per_day,
            } => {
                tracing::info!(
                    trades_today,
                    max_trades_per_day,
                    "Daily trade gate blocked order placement"
                );
            }
            StrategyEvent::OrderPlaced { order_id } => {
                tracing::info!(order_id = %order_id, "Pending order placed");
            }
            StrategyEvent::OrderRejected { reason } => {
                tracing::warn!(reason = %reason, "Pending order rejected by venue");
            }
        }
    }
}

/// Sink that records every event, for assertions in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<StrategyEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StrategyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: StrategyEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl<S: EventSink> EventSink for &S {
    fn emit(&self, event: StrategyEvent) {
        (*self).emit(event);
    }
}
