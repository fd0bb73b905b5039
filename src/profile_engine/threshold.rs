//! Percentage → hand-rank threshold math.
//!
//! Every number that ends up in a `handrank169 <= N` clause comes out of
//! [`threshold`] or [`scale_threshold`]. Rounding is half-to-even throughout,
//! so a value exactly halfway between two ranks lands on the even one.

/// Number of distinct starting-hand classes on the ranking scale.
pub const HAND_CLASSES: i64 = 169;

/// Round to the nearest integer, ties to even.
pub fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}

/// Map a "percentage of hands to play" onto the 1..=169 hand-rank scale.
///
/// `0.0` → 1 (only the best class), `100.0` → 169 (every hand). Out-of-range
/// input is not clamped; scaled callers routinely pass values above 100.
pub fn threshold(pct: f64) -> i64 {
    round_half_even(1.0 + (pct / 100.0) * (HAND_CLASSES - 1) as f64)
}

/// Scale an already-computed threshold by `factor` and round again.
pub fn scale_threshold(base: i64, factor: f64) -> i64 {
    round_half_even(base as f64 * factor)
}

/// Round to one decimal place, ties to even.
pub fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(threshold(0.0), 1);
        assert_eq!(threshold(100.0), HAND_CLASSES);
    }

    #[test]
    fn pinned_values() {
        assert_eq!(threshold(12.5), 22);
        assert_eq!(threshold(25.0), 43);
        assert_eq!(threshold(35.0), 60);
        assert_eq!(threshold(50.0), 85);
        assert_eq!(threshold(75.0), 127);
    }

    #[test]
    fn out_of_range_input_is_not_clamped() {
        assert_eq!(threshold(-10.0), -16);
        assert_eq!(threshold(110.0), 186);
    }

    #[test]
    fn non_decreasing_over_fine_grid() {
        let mut prev = threshold(0.0);
        for step in 1..=10_000 {
            let t = threshold(step as f64 / 100.0);
            assert!(t >= prev, "threshold dropped at {}%", step as f64 / 100.0);
            prev = t;
        }
    }

    #[test]
    fn ties_go_to_even() {
        assert_eq!(round_half_even(42.5), 42);
        assert_eq!(round_half_even(43.5), 44);
        assert_eq!(scale_threshold(85, 0.5), 42);
        assert_eq!(round_to_tenth(2.25), 2.2);
    }

    #[test]
    fn scaling_rounds_after_multiplying() {
        assert_eq!(scale_threshold(43, 0.8), 34);
        assert_eq!(scale_threshold(119, 1.2), 143);
    }
}
