//! Dashboard aggregations over a lookback window.
//!
//! Each view streams the projected columns it needs for the window out of the store
//! and folds them into an accumulator, so memory grows with the number of groups
//! rather than with the number of records.

pub mod interface_health;
pub mod period;
pub mod summary;
pub mod trends;

/// Rounds `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Share of successful runs in percent, one decimal. Zero when there are no runs.
pub fn success_rate(success_count: u64, total_count: u64) -> f64 {
    if total_count == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let rate = success_count as f64 / total_count as f64 * 100.0;
    round_to(rate, 1)
}

/// Mean duration rounded to two decimals. Zero when there are no runs.
pub fn average_duration(duration_total: i64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let average = duration_total as f64 / count as f64;
    round_to(average, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate_is_zero_without_runs() {
        assert_eq!(success_rate(0, 0), 0.0);
        assert!(!success_rate(0, 0).is_nan());
    }

    #[test]
    fn test_success_rate_rounds_to_one_decimal() {
        assert_eq!(success_rate(1, 3), 33.3);
        assert_eq!(success_rate(2, 3), 66.7);
        assert_eq!(success_rate(5, 5), 100.0);
    }

    #[test]
    fn test_average_duration_rounds_to_two_decimals() {
        assert_eq!(average_duration(1000, 3), 333.33);
        assert_eq!(average_duration(0, 0), 0.0);
        assert_eq!(average_duration(1500, 2), 750.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345_6, 2), 12.35);
        assert_eq!(round_to(12.34, 0), 12.0);
    }
}
