//! Pending-order pricing for a qualified breakout candle.
//!
//! Entry is the midpoint of the breakout candle's body. The stop starts as a
//! tight stop a few pips beyond the candle's extreme; when that lands too
//! close to the entry, the opposite range edge is used instead as a wider,
//! structurally meaningful stop. Take-profit is a fixed percentage of the
//! entry price. Position size comes verbatim from configuration.

use crate::config::StrategyConfig;
use crate::types::{Candle, Direction, OrderCandidate, Range};

/// Pips between the candle close and the tight stop.
const STOP_OFFSET_PIPS: f64 = 3.0;

/// Build the order candidate for a breakout candle. Total over valid inputs.
pub fn build_candidate(
    candle: &Candle,
    direction: Direction,
    range: &Range,
    config: &StrategyConfig,
) -> OrderCandidate {
    let entry = candle.open + 0.5 * (candle.close - candle.open);
    let tight_offset = STOP_OFFSET_PIPS * config.pip_size;
    let min_stop_distance = config.min_alt_sl_pips as f64 * config.pip_size;

    let (sl, tp) = match direction {
        Direction::Long => {
            let mut sl = candle.low.min(candle.close - tight_offset);
            if entry - sl < min_stop_distance {
                sl = range.low;
            }
            (sl, entry * (1.0 + config.tp_pct))
        }
        Direction::Short => {
            let mut sl = candle.high.max(candle.close + tight_offset);
            if sl - entry < min_stop_distance {
                sl = range.high;
            }
            (sl, entry * (1.0 - config.tp_pct))
        }
    };

    OrderCandidate {
        direction,
        entry,
        sl,
        tp,
        volume: config.volume,
        magic: config.magic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn range() -> Range {
        Range {
            high: 2000.0,
            low: 1995.0,
            start: Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 15, 12, 45, 0).unwrap(),
        }
    }

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            datetime: Utc.with_ymd_and_hms(2024, 1, 15, 12, 45, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    #[test]
    fn test_long_candidate_pricing() {
        let config = StrategyConfig::default();
        let c = candle(1996.0, 2001.2, 1995.8, 2001.0);
        let candidate = build_candidate(&c, Direction::Long, &range(), &config);

        assert_eq!(candidate.direction, Direction::Long);
        assert_relative_eq!(candidate.entry, 1998.5);
        // Tight stop: min(1995.80, 2001.00 - 0.03) = 1995.80, and the
        // entry-to-stop distance of 2.70 keeps it
        assert_relative_eq!(candidate.sl, 1995.8);
        assert_relative_eq!(candidate.tp, 2058.455);
        assert_eq!(candidate.volume, config.volume);
        assert_eq!(candidate.magic, config.magic);
    }

    #[test]
    fn test_entry_is_body_midpoint() {
        let config = StrategyConfig::default();
        let c = candle(1996.0, 2001.2, 1995.8, 2001.0);
        let candidate = build_candidate(&c, Direction::Long, &range(), &config);
        assert!(candidate.entry > c.open && candidate.entry < c.close);
        assert_relative_eq!(candidate.entry - c.open, c.close - candidate.entry);
    }

    #[test]
    fn test_long_alt_stop_when_tight_stop_too_close() {
        let config = StrategyConfig::default();
        // Tight stop 1999.99 sits 0.03 under the 2000.02 entry, inside the
        // 5-pip minimum, so the range low takes over
        let c = candle(2000.0, 2000.05, 1999.99, 2000.04);
        let candidate = build_candidate(&c, Direction::Long, &range(), &config);
        assert_relative_eq!(candidate.sl, 1995.0);
    }

    #[test]
    fn test_short_candidate_pricing() {
        let config = StrategyConfig::default();
        let c = candle(1999.0, 1999.2, 1993.8, 1994.0);
        let candidate = build_candidate(&c, Direction::Short, &range(), &config);

        assert_relative_eq!(candidate.entry, 1996.5);
        // max(1999.20, 1994.00 + 0.03) = 1999.20, distance 2.70 keeps it
        assert_relative_eq!(candidate.sl, 1999.2);
        assert_relative_eq!(candidate.tp, 1996.5 * 0.97);
        assert!(candidate.sl > candidate.entry);
        assert!(candidate.tp < candidate.entry);
    }

    #[test]
    fn test_short_alt_stop_when_tight_stop_too_close() {
        let config = StrategyConfig::default();
        let c = candle(1995.0, 1995.01, 1994.95, 1994.96);
        let candidate = build_candidate(&c, Direction::Short, &range(), &config);
        assert_relative_eq!(candidate.sl, 2000.0);
    }

    #[test]
    fn test_take_profit_offsets() {
        let config = StrategyConfig::default();
        let c = candle(1996.0, 2001.2, 1995.8, 2001.0);

        let long = build_candidate(&c, Direction::Long, &range(), &config);
        assert_relative_eq!(long.tp, long.entry * (1.0 + config.tp_pct));
        assert!(long.tp > long.entry && long.sl < long.entry);

        let short = build_candidate(&c, Direction::Short, &range(), &config);
        assert_relative_eq!(short.tp, short.entry * (1.0 - config.tp_pct));
    }
}
