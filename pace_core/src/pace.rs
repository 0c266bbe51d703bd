//! Pace derivation from a single goal pace.
//!
//! All formulas operate on total seconds per mile and re-derive structured
//! durations with the ceiling rule from the duration module. The two formula
//! constants (race distance in miles and the short-race divisor) are
//! parameters, so the retired formula generation can be restored by
//! overriding them in the config file.

use crate::duration::format_duration;
use crate::{AdjustmentMode, Duration, PaceCard, PaceRule, RaceDistance};

/// Marathon distance in miles, current formula generation
pub const DEFAULT_MARATHON_MILES: f64 = 26.218;

/// Divisor estimating the shorter-race reference pace from the goal pace
pub const DEFAULT_SHORT_RACE_FACTOR: f64 = 1.06;

/// Point-value placeholder shown before a goal pace exists
pub const PLACEHOLDER_PACE: &str = "--:-- /mi";

/// Range placeholder shown before a goal pace exists
pub const PLACEHOLDER_RANGE: &str = "--:-- - --:-- /mi";

/// Overridable formula constants
#[derive(Clone, Copy, Debug)]
pub struct PaceSettings {
    pub marathon_miles: f64,
    pub short_race_factor: f64,
}

impl Default for PaceSettings {
    fn default() -> Self {
        Self {
            marathon_miles: DEFAULT_MARATHON_MILES,
            short_race_factor: DEFAULT_SHORT_RACE_FACTOR,
        }
    }
}

impl PaceSettings {
    /// Race distance in miles, with the marathon constant taken from settings
    /// rather than the built-in default
    pub fn distance_miles(&self, distance: RaceDistance) -> f64 {
        match distance {
            RaceDistance::Marathon => self.marathon_miles,
            other => other.miles(),
        }
    }
}

/// Scale a pace by a percentage: positive values slow it down
pub fn adjust_pace_by_percentage(pace: &Duration, percentage_slower: f64) -> Duration {
    let adjusted = pace.total_seconds() * (1.0 + percentage_slower / 100.0);
    Duration::from_total_seconds(adjusted)
}

/// Shift a pace by a signed number of seconds
pub fn adjust_pace_by_time(pace: &Duration, seconds_adjustment: f64) -> Duration {
    Duration::from_total_seconds(pace.total_seconds() + seconds_adjustment)
}

/// Apply both offsets of a rule against the same base pace.
///
/// Returns `(slow, middle, fast)` where middle is the arithmetic mean of the
/// two adjusted paces. Slots are positional: the value computed from the
/// `slow` offset lands in the slow slot even if a rule's offsets would make
/// it the numerically smaller pace.
pub fn adjusted_pace_range(
    base: &Duration,
    mode: AdjustmentMode,
    fast_adjustment: f64,
    slow_adjustment: f64,
) -> (Duration, Duration, Duration) {
    let (slow_pace, fast_pace) = match mode {
        AdjustmentMode::Pct => (
            adjust_pace_by_percentage(base, slow_adjustment),
            adjust_pace_by_percentage(base, fast_adjustment),
        ),
        _ => (
            adjust_pace_by_time(base, slow_adjustment),
            adjust_pace_by_time(base, fast_adjustment),
        ),
    };

    let average_seconds = (slow_pace.total_seconds() + fast_pace.total_seconds()) / 2.0;

    (
        slow_pace,
        Duration::from_total_seconds(average_seconds),
        fast_pace,
    )
}

/// Faster reference pace for threshold-type work: the goal pace divided by
/// `short_race_factor`
pub fn estimate_short_race_pace(goal_pace: &Duration, short_race_factor: f64) -> Duration {
    Duration::from_total_seconds(goal_pace.total_seconds() / short_race_factor)
}

/// Per-mile pace for a race finish time over `distance_miles`
pub fn race_time_to_pace(time: &Duration, distance_miles: f64) -> Duration {
    Duration::from_total_seconds(time.total_seconds() / distance_miles)
}

/// Race finish time for a per-mile pace over `distance_miles`.
///
/// Approximate inverse of [`race_time_to_pace`], subject to the ceiling
/// rounding; round-trip error stays under a minute for realistic inputs.
pub fn race_pace_to_time(pace: &Duration, distance_miles: f64) -> Duration {
    Duration::from_total_seconds(pace.total_seconds() * distance_miles)
}

/// Render a `"<fast> - <slow>"` range label
pub fn format_pace_range(fast_pace: &Duration, slow_pace: &Duration) -> String {
    format!(
        "{} - {}",
        format_duration(fast_pace),
        format_duration(slow_pace)
    )
}

/// Resolve one named training pace from the goal pace.
///
/// An absent or non-positive goal yields the placeholder card; resolving a
/// pace never fails on a missing goal.
pub fn resolve_training_pace(goal_pace_seconds: Option<f64>, rule: &PaceRule) -> PaceCard {
    let goal_seconds = match goal_pace_seconds {
        Some(seconds) if seconds > 0.0 => seconds,
        _ => {
            return PaceCard {
                pace: PLACEHOLDER_PACE.into(),
                range: PLACEHOLDER_RANGE.into(),
                description: None,
            }
        }
    };

    let mut pace = Duration::from_total_seconds(goal_seconds);
    if let Some(multiplier) = rule.multiplier {
        pace = Duration::from_total_seconds(pace.total_seconds() * multiplier);
    }

    if rule.mode == AdjustmentMode::Race {
        return PaceCard {
            pace: format!("{}/mi", format_duration(&pace)),
            range: "Race Pace".into(),
            description: Some(rule.description.clone()),
        };
    }

    let (slow_pace, middle_pace, fast_pace) =
        adjusted_pace_range(&pace, rule.mode, rule.fast, rule.slow);

    PaceCard {
        pace: format!("{}/mi", format_duration(&middle_pace)),
        range: format_pace_range(&fast_pace, &slow_pace),
        description: Some(rule.description.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(mode: AdjustmentMode, fast: f64, slow: f64) -> PaceRule {
        PaceRule {
            mode,
            fast,
            slow,
            multiplier: None,
            description: "test rule".into(),
        }
    }

    #[test]
    fn test_adjust_pace_by_percentage() {
        let base = Duration::new(0, 8, 0);
        assert_eq!(
            adjust_pace_by_percentage(&base, 10.0),
            Duration::new(0, 8, 48)
        );
        assert_eq!(
            adjust_pace_by_percentage(&base, -10.0),
            Duration::new(0, 7, 12)
        );
        assert_eq!(adjust_pace_by_percentage(&base, 0.0), Duration::new(0, 8, 0));
    }

    #[test]
    fn test_adjust_pace_by_time() {
        let base = Duration::new(0, 8, 0);
        assert_eq!(adjust_pace_by_time(&base, 30.0), Duration::new(0, 8, 30));
        assert_eq!(adjust_pace_by_time(&base, -30.0), Duration::new(0, 7, 30));
    }

    #[test]
    fn test_adjusted_pace_range_pct() {
        let base = Duration::new(0, 8, 0);
        let (slow, middle, fast) = adjusted_pace_range(&base, AdjustmentMode::Pct, -10.0, 10.0);

        assert_eq!(slow, Duration::new(0, 8, 48));
        assert_eq!(middle, Duration::new(0, 8, 0));
        assert_eq!(fast, Duration::new(0, 7, 12));
    }

    #[test]
    fn test_adjusted_pace_range_time() {
        let base = Duration::new(0, 8, 0);
        let (slow, middle, fast) = adjusted_pace_range(&base, AdjustmentMode::Time, -30.0, 30.0);

        assert_eq!(slow, Duration::new(0, 8, 30));
        assert_eq!(middle, Duration::new(0, 8, 0));
        assert_eq!(fast, Duration::new(0, 7, 30));
    }

    #[test]
    fn test_range_slots_are_positional() {
        // Inverted offsets: the "slow" input computes the faster value, and
        // it still lands in the slow slot.
        let base = Duration::new(0, 8, 0);
        let (slow, _, fast) = adjusted_pace_range(&base, AdjustmentMode::Pct, 10.0, -10.0);

        assert_eq!(slow, Duration::new(0, 7, 12));
        assert_eq!(fast, Duration::new(0, 8, 48));
    }

    #[test]
    fn test_estimate_short_race_pace() {
        let pace = estimate_short_race_pace(&Duration::new(0, 8, 0), 1.06);
        assert_eq!(pace, Duration::new(0, 7, 33));

        let pace = estimate_short_race_pace(&Duration::new(0, 7, 0), 1.06);
        assert_eq!(pace, Duration::new(0, 6, 37));
    }

    #[test]
    fn test_race_time_to_pace() {
        let pace = race_time_to_pace(&Duration::new(3, 30, 0), DEFAULT_MARATHON_MILES);
        assert_eq!(pace.hours, 0);
        assert_eq!(pace.minutes, 8);
        assert!(pace.seconds <= 1);
    }

    #[test]
    fn test_race_pace_to_time() {
        let time = race_pace_to_time(&Duration::new(0, 8, 0), DEFAULT_MARATHON_MILES);
        assert_eq!(time.hours, 3);
        assert_eq!(time.minutes, 29);
        assert!((time.seconds as i32 - 44).abs() <= 1);
    }

    #[test]
    fn test_time_pace_round_trip_under_a_minute() {
        let original = Duration::new(3, 30, 0);
        let pace = race_time_to_pace(&original, DEFAULT_MARATHON_MILES);
        let converted = race_pace_to_time(&pace, DEFAULT_MARATHON_MILES);

        let difference = (original.total_seconds() - converted.total_seconds()).abs();
        assert!(difference < 60.0, "round-trip drifted {} seconds", difference);
    }

    #[test]
    fn test_resolve_training_pace_without_goal() {
        let pct_rule = rule(AdjustmentMode::Pct, -10.0, 10.0);

        for goal in [None, Some(0.0), Some(-5.0)] {
            let card = resolve_training_pace(goal, &pct_rule);
            assert_eq!(card.pace, PLACEHOLDER_PACE);
            assert_eq!(card.range, PLACEHOLDER_RANGE);
            assert_eq!(card.description, None);
        }
    }

    #[test]
    fn test_resolve_training_pace_race_mode() {
        let race_rule = rule(AdjustmentMode::Race, 0.0, 0.0);
        let card = resolve_training_pace(Some(480.0), &race_rule);

        assert_eq!(card.pace, "08:00/mi");
        assert_eq!(card.range, "Race Pace");
        assert_eq!(card.description.as_deref(), Some("test rule"));
    }

    #[test]
    fn test_resolve_training_pace_pct_mode() {
        let pct_rule = rule(AdjustmentMode::Pct, 10.0, 20.0);
        let card = resolve_training_pace(Some(480.0), &pct_rule);

        // 10% slower is 8:48, 20% slower is 9:36, midpoint 9:12
        assert_eq!(card.pace, "09:12/mi");
        assert_eq!(card.range, "08:48 - 09:36");
    }

    #[test]
    fn test_resolve_training_pace_applies_multiplier() {
        let mut race_rule = rule(AdjustmentMode::Race, 0.0, 0.0);
        race_rule.multiplier = Some(0.5);

        let card = resolve_training_pace(Some(480.0), &race_rule);
        assert_eq!(card.pace, "04:00/mi");
    }

    #[test]
    fn test_settings_distance_override() {
        let settings = PaceSettings {
            marathon_miles: 26.2,
            ..PaceSettings::default()
        };

        assert_eq!(settings.distance_miles(RaceDistance::Marathon), 26.2);
        assert_eq!(
            settings.distance_miles(RaceDistance::HalfMarathon),
            RaceDistance::HalfMarathon.miles()
        );
    }
}
