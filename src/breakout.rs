//! Breakout candle qualification.
//!
//! After the range window closes, fine candles are examined in timestamp
//! order until one qualifies or the confirmation budget runs out. A
//! qualifying candle must have a strong body relative to its own span and a
//! body displaced decisively beyond the range, with its open far enough from
//! the broken edge that the move is not a marginal poke.

use crate::config::StrategyConfig;
use crate::types::{Candle, Direction, Range};

/// Floor for span/width divisors on degenerate candles.
const EPSILON: f64 = 1e-9;

/// Classify a single candle against the range.
///
/// Long: close above `range.high`, bullish body, open at least
/// `open_away_from_edge_pct` of the range width below the high. Short is the
/// mirror against `range.low`. The two directions are mutually exclusive by
/// construction since one needs a close above the range and the other below.
pub fn classify(candle: &Candle, range: &Range, config: &StrategyConfig) -> Option<Direction> {
    let span = candle.span().max(EPSILON);
    let body_pct = candle.body() / span;
    if body_pct < config.strong_body_min_pct {
        return None;
    }

    let width = range.width().max(EPSILON);
    let min_displacement = config.open_away_from_edge_pct * width;

    if candle.close > range.high
        && candle.is_bullish()
        && (range.high - candle.open) >= min_displacement
    {
        return Some(Direction::Long);
    }

    if candle.close < range.low
        && candle.open > candle.close
        && (candle.open - range.low) >= min_displacement
    {
        return Some(Direction::Short);
    }

    None
}

/// Find the first qualifying breakout candle strictly after the range window.
///
/// At most `confirm_bars_max + 1` candles are examined. Returning `None` is
/// a valid daily outcome, not an error.
pub fn find_breakout<'a>(
    candles: &'a [Candle],
    range: &Range,
    config: &StrategyConfig,
) -> Option<(&'a Candle, Direction)> {
    let mut budget = config.confirm_bars_max as i64;

    for candle in candles.iter().filter(|c| c.datetime >= range.end) {
        if let Some(direction) = classify(candle, range, config) {
            return Some((candle, direction));
        }
        budget -= 1;
        if budget < 0 {
            break;
        }
    }

    None
}
