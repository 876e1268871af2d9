//! Session window and opening-range resolution.
//!
//! The range is anchored to a fixed local-time window in the venue's trading
//! calendar (e.g. 09:30 + 15 minutes in America/Santiago). Candle timestamps
//! arrive in UTC, so the window is built from the first candle's local date
//! and compared as instants.

use chrono::{Duration, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::StrategyConfig;
use crate::error::StrategyError;
use crate::types::{Candle, Range};

/// Parsed session-window parameters, derived once from the strategy config.
#[derive(Debug, Clone, Copy)]
pub struct SessionWindow {
    pub tz: Tz,
    pub open: NaiveTime,
    pub minutes: i64,
}

impl SessionWindow {
    pub fn from_config(config: &StrategyConfig) -> anyhow::Result<Self> {
        Ok(SessionWindow {
            tz: config.timezone()?,
            open: config.session_time()?,
            minutes: config.range_minutes,
        })
    }
}

/// Resolve the opening range from coarse candles.
///
/// The session window is `[open, open + minutes)` on the local date of the
/// first supplied candle. By default only the first covered candle defines
/// the range; with `aggregate` set, every covered candle contributes
/// (max of highs, min of lows).
///
/// Pure over its inputs; fails with [`StrategyError::RangeNotFound`] when no
/// candle timestamp falls inside the window.
pub fn resolve_range(
    candles: &[Candle],
    window: &SessionWindow,
    aggregate: bool,
) -> Result<Range, StrategyError> {
    let first = candles.first().ok_or_else(|| {
        StrategyError::DataUnavailable("no coarse candles supplied".to_string())
    })?;

    let local_date = first.datetime.with_timezone(&window.tz).date_naive();
    let naive_start = local_date.and_time(window.open);
    let start_local = match window.tz.from_local_datetime(&naive_start) {
        LocalResult::Single(dt) => dt,
        // DST fall-back repeats the hour; the first occurrence is the session
        LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            return Err(StrategyError::DataUnavailable(format!(
                "session open {} does not exist in {}",
                naive_start, window.tz
            )))
        }
    };
    let start = start_local.with_timezone(&Utc);
    let end = start + Duration::minutes(window.minutes);

    let mut covered = candles
        .iter()
        .filter(|c| c.datetime >= start && c.datetime < end);

    let anchor = covered
        .next()
        .ok_or(StrategyError::RangeNotFound { start, end })?;

    let (high, low) = if aggregate {
        covered.fold((anchor.high, anchor.low), |(h, l), c| {
            (h.max(c.high), l.min(c.low))
        })
    } else {
        (anchor.high, anchor.low)
    };

    Ok(Range {
        high,
        low,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn window() -> SessionWindow {
        SessionWindow::from_config(&StrategyConfig::default()).unwrap()
    }

    fn candle(datetime: DateTime<Utc>, high: f64, low: f64) -> Candle {
        Candle {
            datetime,
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: Some(100.0),
        }
    }

    // 2024-01-15 is Chilean summer time (UTC-3): 09:30 local == 12:30 UTC
    fn session_utc(min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, min, 0).unwrap()
    }

    #[test]
    fn test_resolves_first_covered_candle() {
        let candles = vec![
            candle(session_utc(0), 1990.0, 1985.0),
            candle(session_utc(15), 2005.0, 1992.0),
            candle(session_utc(30), 2000.0, 1995.0),
            candle(session_utc(45), 2010.0, 1999.0),
        ];
        let range = resolve_range(&candles, &window(), false).unwrap();
        assert_eq!(range.high, 2000.0);
        assert_eq!(range.low, 1995.0);
        assert_eq!(range.start, session_utc(30));
        assert_eq!(range.end, session_utc(45));
    }

    #[test]
    fn test_range_not_found_without_session_candle() {
        // Candles only before the 09:30 local session open
        let candles = vec![
            candle(session_utc(0), 1990.0, 1985.0),
            candle(session_utc(15), 2005.0, 1992.0),
        ];
        let err = resolve_range(&candles, &window(), false).unwrap_err();
        assert!(matches!(err, StrategyError::RangeNotFound { .. }));
    }

    #[test]
    fn test_empty_candles_is_data_unavailable() {
        let err = resolve_range(&[], &window(), false).unwrap_err();
        assert!(matches!(err, StrategyError::DataUnavailable(_)));
    }

    #[test]
    fn test_aggregate_folds_all_covered_candles() {
        // Two finer candles inside the 15 minute window
        let candles = vec![
            candle(session_utc(30), 2000.0, 1995.0),
            candle(session_utc(37), 2003.0, 1993.0),
            candle(session_utc(45), 2020.0, 1980.0),
        ];
        let first_only = resolve_range(&candles, &window(), false).unwrap();
        assert_eq!(first_only.high, 2000.0);
        assert_eq!(first_only.low, 1995.0);

        let folded = resolve_range(&candles, &window(), true).unwrap();
        assert_eq!(folded.high, 2003.0);
        assert_eq!(folded.low, 1993.0);
    }

    #[test]
    fn test_window_anchored_to_first_candle_date() {
        // First candle on the 16th moves the whole window one day forward
        let candles = vec![
            candle(Utc.with_ymd_and_hms(2024, 1, 16, 12, 30, 0).unwrap(), 2001.0, 1996.0),
        ];
        let range = resolve_range(&candles, &window(), false).unwrap();
        assert_eq!(
            range.start,
            Utc.with_ymd_and_hms(2024, 1, 16, 12, 30, 0).unwrap()
        );
        assert_eq!(range.high, 2001.0);
    }
}
