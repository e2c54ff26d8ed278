//! Time parsing and formatting utilities

use crate::error::{PipelineError, PipelineResult};

/// Most components a timestamp may have (`H:M:S`)
const MAX_COMPONENTS: usize = 3;

/// Parse `H:M:S`, `M:S` or `S` into whole seconds.
///
/// Components are walked from the right, each weighted by `60^position`.
/// No upper bound applies to any component, so `"90"` and `"99:00"` are
/// both accepted.
pub fn parse_time(time_str: &str) -> PipelineResult<u64> {
    let invalid = || PipelineError::Parse {
        input: time_str.to_string(),
    };

    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() > MAX_COMPONENTS {
        return Err(invalid());
    }

    let mut seconds: u64 = 0;
    let mut weight: u64 = 1;
    for part in parts.iter().rev() {
        // u64::from_str accepts a leading '+', which is not a timestamp digit
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u64 = part.parse().map_err(|_| invalid())?;
        seconds = value
            .checked_mul(weight)
            .and_then(|v| v.checked_add(seconds))
            .ok_or_else(invalid)?;
        weight *= 60;
    }

    Ok(seconds)
}

/// Format seconds as `HH:MM:SS`
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hh_mm_ss() {
        assert_eq!(parse_time("01:02:03").unwrap(), 3723);
        assert_eq!(parse_time("00:08:00").unwrap(), 480);
    }

    #[test]
    fn test_parse_mm_ss() {
        assert_eq!(parse_time("2:05").unwrap(), 125);
    }

    #[test]
    fn test_parse_seconds_only() {
        assert_eq!(parse_time("90").unwrap(), 90);
        assert_eq!(parse_time("0").unwrap(), 0);
    }

    #[test]
    fn test_components_are_not_bounded() {
        assert_eq!(parse_time("99:00").unwrap(), 5940);
        assert_eq!(parse_time("0:90").unwrap(), 90);
        assert_eq!(parse_time("1:75:00").unwrap(), 3600 + 75 * 60);
    }

    #[test]
    fn test_rejects_too_many_components() {
        let err = parse_time("1:00:00:00").unwrap_err();
        assert!(matches!(err, PipelineError::Parse { ref input } if input == "1:00:00:00"));
    }

    #[test]
    fn test_rejects_non_integer_components() {
        for bad in ["abc", "1:xx", "00:00:1.5", "-5", "+5", "", "1::2", " 10"] {
            assert!(parse_time(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(parse_time("99999999999999999999").is_err());
        assert!(parse_time(&format!("{}:00:00", u64::MAX / 2)).is_err());
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(3723), "01:02:03");
        assert_eq!(format_hms(59), "00:00:59");
    }
}
