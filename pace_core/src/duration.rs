//! Duration arithmetic: total seconds, parsing and formatting.
//!
//! The canonical numeric form of a duration is total seconds as `f64`.
//! Fractional values appear during pace math and are rounded back to whole
//! seconds with a ceiling, never to nearest: displayed paces err on the slow
//! side. As a consequence `from_total_seconds(d.total_seconds())` is not a
//! strict round-trip for fractional input; that is policy, not a bug.

use crate::{Duration, Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted shape for user-entered durations: `MM:SS` or `HH:MM:SS`
static DURATION_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):([0-5]\d)(:[0-5]\d)?$").expect("valid duration pattern"));

impl Duration {
    /// Total seconds: `hours*3600 + minutes*60 + seconds`
    pub fn total_seconds(&self) -> f64 {
        f64::from(self.hours) * 3600.0 + f64::from(self.minutes) * 60.0 + f64::from(self.seconds)
    }

    /// Rebuild a duration from total seconds.
    ///
    /// Hours and minutes are floored; leftover fractional seconds round up.
    pub fn from_total_seconds(total_seconds: f64) -> Self {
        let hours = (total_seconds / 3600.0).floor();
        let minutes = ((total_seconds - hours * 3600.0) / 60.0).floor();
        let seconds = (total_seconds - hours * 3600.0 - minutes * 60.0).ceil();

        Self {
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }
}

/// Parse `HH:MM:SS` or `MM:SS` without range validation.
///
/// Two segments are minutes:seconds with hours 0; three are
/// hours:minutes:seconds. A non-numeric segment or wrong segment count is an
/// error. Callers handling raw user input must gate on
/// [`duration_from_input`] instead of calling this directly.
pub fn parse_duration_string(text: &str) -> Result<Duration> {
    let parts = text
        .split(':')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| Error::Duration(format!("'{}' is not a number in '{}'", part, text)))
        })
        .collect::<Result<Vec<u32>>>()?;

    match parts.as_slice() {
        [hours, minutes, seconds] => Ok(Duration::new(*hours, *minutes, *seconds)),
        [minutes, seconds] => Ok(Duration::new(0, *minutes, *seconds)),
        _ => Err(Error::Duration(format!(
            "expected MM:SS or HH:MM:SS, got '{}'",
            text
        ))),
    }
}

/// Boundary validation for raw user input.
///
/// Returns `None` unless the text matches the accepted digit/colon shape;
/// on a match, delegates to [`parse_duration_string`].
pub fn duration_from_input(text: &str) -> Option<Duration> {
    let trimmed = text.trim();
    if DURATION_INPUT.is_match(trimmed) {
        parse_duration_string(trimmed).ok()
    } else {
        None
    }
}

/// Format as zero-padded `MM:SS`, or `HH:MM:SS` when hours are present.
///
/// Each field is independently padded to two digits; hours above 99 would
/// break the fixed-width contract, which is acceptable for this domain.
pub fn format_duration(duration: &Duration) -> String {
    if duration.hours > 0 {
        format!(
            "{:02}:{:02}:{:02}",
            duration.hours, duration.minutes, duration.seconds
        )
    } else {
        format!("{:02}:{:02}", duration.minutes, duration.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_seconds() {
        assert_eq!(Duration::new(2, 30, 15).total_seconds(), 9015.0);
        assert_eq!(Duration::new(0, 0, 0).total_seconds(), 0.0);
        assert_eq!(Duration::new(0, 30, 15).total_seconds(), 1815.0);
        assert_eq!(Duration::new(0, 0, 45).total_seconds(), 45.0);
    }

    #[test]
    fn test_from_total_seconds() {
        assert_eq!(Duration::from_total_seconds(9015.0), Duration::new(2, 30, 15));
        assert_eq!(Duration::from_total_seconds(0.0), Duration::new(0, 0, 0));
        assert_eq!(Duration::from_total_seconds(45.0), Duration::new(0, 0, 45));
        assert_eq!(Duration::from_total_seconds(1830.0), Duration::new(0, 30, 30));
    }

    #[test]
    fn test_from_total_seconds_rounds_up() {
        // 1 hour and 0.7 seconds: the fraction becomes a whole second
        assert_eq!(
            Duration::from_total_seconds(3600.7),
            Duration::new(1, 0, 1)
        );
    }

    #[test]
    fn test_round_trip_is_idempotent_after_first_rounding() {
        for total in [9015.0, 480.58, 3600.7, 127.001] {
            let once = Duration::from_total_seconds(total);
            let twice = Duration::from_total_seconds(once.total_seconds());
            assert_eq!(once, twice);
            assert_eq!(once.total_seconds(), total.ceil());
        }
    }

    #[test]
    fn test_parse_duration_string() {
        assert_eq!(
            parse_duration_string("02:30:15").unwrap(),
            Duration::new(2, 30, 15)
        );
        assert_eq!(
            parse_duration_string("30:15").unwrap(),
            Duration::new(0, 30, 15)
        );
        assert_eq!(
            parse_duration_string("1:05:09").unwrap(),
            Duration::new(1, 5, 9)
        );
        assert_eq!(parse_duration_string("5:9").unwrap(), Duration::new(0, 5, 9));
    }

    #[test]
    fn test_parse_duration_string_rejects_garbage() {
        assert!(parse_duration_string("abc").is_err());
        assert!(parse_duration_string("1:xx").is_err());
        assert!(parse_duration_string("1:2:3:4").is_err());
    }

    #[test]
    fn test_duration_from_input() {
        assert_eq!(
            duration_from_input("08:30:15"),
            Some(Duration::new(8, 30, 15))
        );
        assert_eq!(duration_from_input("08:30"), Some(Duration::new(0, 8, 30)));
        assert_eq!(duration_from_input("8:00"), Some(Duration::new(0, 8, 0)));
    }

    #[test]
    fn test_duration_from_input_rejects_bad_shapes() {
        assert_eq!(duration_from_input("invalid"), None);
        assert_eq!(duration_from_input("8:30:15:extra"), None);
        // Out-of-range minutes fail the boundary pattern
        assert_eq!(duration_from_input("08:60:15"), None);
        assert_eq!(duration_from_input("8:7"), None);
        assert_eq!(duration_from_input(""), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::new(2, 30, 15)), "02:30:15");
        assert_eq!(format_duration(&Duration::new(0, 30, 15)), "30:15");
        assert_eq!(format_duration(&Duration::new(0, 8, 0)), "08:00");
        assert_eq!(format_duration(&Duration::new(1, 5, 9)), "01:05:09");
    }
}
