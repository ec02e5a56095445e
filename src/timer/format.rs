//! Duration formatting and parsing

use std::time::Duration;

const MS_IN_SECOND: u64 = 1000;
const MS_IN_MINUTE: u64 = 60 * MS_IN_SECOND;

/// Format a millisecond count as `MM:SS`.
///
/// Seconds are floored and minutes are not capped, so two hours renders as
/// `120:00`.
pub fn format_mmss(ms: u64) -> String {
    let minutes = ms / MS_IN_MINUTE;
    let seconds = (ms % MS_IN_MINUTE) / MS_IN_SECOND;
    format!("{minutes:02}:{seconds:02}")
}

/// Parse a duration string like `25`, `25m`, `1h30m` or `90s`.
///
/// A bare number, or a trailing number without a unit, counts as minutes.
/// Returns `None` for empty, zero or malformed input.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    if let Ok(minutes) = input.parse::<u64>() {
        if minutes == 0 {
            return None;
        }
        return minutes.checked_mul(60).map(Duration::from_secs);
    }

    let mut total_secs: u64 = 0;
    let mut digits = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        if digits.is_empty() {
            return None;
        }
        let value: u64 = digits.parse().ok()?;
        digits.clear();

        let unit_secs = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total_secs = total_secs.checked_add(value.checked_mul(unit_secs)?)?;
    }

    if !digits.is_empty() {
        let value: u64 = digits.parse().ok()?;
        total_secs = total_secs.checked_add(value.checked_mul(60)?)?;
    }

    (total_secs > 0).then(|| Duration::from_secs(total_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(65_000), "01:05");
        assert_eq!(format_mmss(25 * MS_IN_MINUTE), "25:00");
        assert_eq!(format_mmss(120 * MS_IN_MINUTE), "120:00");
    }

    #[test]
    fn test_format_mmss_floors_partial_seconds() {
        assert_eq!(format_mmss(1_999), "00:01");
        assert_eq!(format_mmss(59_999), "00:59");
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(Duration::from_secs(25 * 60)));
        assert_eq!(parse_duration("25m"), Some(Duration::from_secs(25 * 60)));
        assert_eq!(parse_duration(" 5M "), Some(Duration::from_secs(5 * 60)));
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(90 * 60)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("1h5"), Some(Duration::from_secs(3900)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("10x").is_none());
        assert!(parse_duration("m5").is_none());
    }
}
