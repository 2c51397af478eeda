/// Formats a run duration in milliseconds for display.
///
/// Durations under a second stay in milliseconds, under a minute are shown in
/// seconds, anything longer in minutes. Fractions are kept to one decimal.
pub fn format_duration(duration_ms: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let millis = duration_ms as f64;

    if duration_ms < 1000 {
        format!("{duration_ms}ms")
    } else if duration_ms < 60_000 {
        format!("{:.1}s", millis / 1000.0)
    } else {
        format!("{:.1}m", millis / 60_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliseconds_below_one_second() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(999), "999ms");
    }

    #[test]
    fn test_seconds_below_one_minute() {
        assert_eq!(format_duration(1000), "1.0s");
        assert_eq!(format_duration(12_340), "12.3s");
        assert_eq!(format_duration(59_999), "60.0s");
    }

    #[test]
    fn test_minutes_from_one_minute() {
        assert_eq!(format_duration(60_000), "1.0m");
        assert_eq!(format_duration(150_000), "2.5m");
    }
}
