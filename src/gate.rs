//! Daily trade gate.
//!
//! A counting gate over the venue's own execution history for the current
//! trading day. No caching: the history query is ground truth for "today",
//! and the count is recomputed on every evaluation.

/// True when another order may be placed today.
pub fn may_place_order(trades_today: usize, max_trades_per_day: usize) -> bool {
    trades_today < max_trades_per_day
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_blocks_at_cap() {
        assert!(may_place_order(0, 1));
        assert!(!may_place_order(1, 1));
        assert!(!may_place_order(2, 1));
    }

    #[test]
    fn test_gate_with_higher_cap() {
        assert!(may_place_order(0, 3));
        assert!(may_place_order(2, 3));
        assert!(!may_place_order(3, 3));
        assert!(!may_place_order(10, 3));
    }

    #[test]
    fn test_zero_cap_always_blocks() {
        assert!(!may_place_order(0, 0));
    }
}
