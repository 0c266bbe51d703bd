//! Built-in catalog of training plans.
//!
//! Plans are static data: a fixed grid of weeks (7 days each, race on the
//! final day), a workout-type label map, and the pace rules that derive each
//! training pace from the goal pace.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog, built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in training plans
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn day(workout_type: &str, distance: f64) -> Workout {
    Workout {
        workout_type: workout_type.into(),
        distance,
        distance_unit: DistanceUnit::Mi,
        notes: None,
    }
}

fn day_note(workout_type: &str, distance: f64, notes: &str) -> Workout {
    Workout {
        notes: Some(notes.into()),
        ..day(workout_type, distance)
    }
}

fn standard_workout_types() -> HashMap<String, String> {
    HashMap::from([
        ("rest".into(), "Rest".into()),
        ("recovery".into(), "Recovery".into()),
        ("general_aerobic".into(), "General Aerobic".into()),
        ("lactate_threshold".into(), "Lactate Threshold".into()),
        ("interval".into(), "Interval".into()),
        ("long_run".into(), "Long Run".into()),
        ("race".into(), "Race".into()),
    ])
}

/// Pace rules shared by the built-in plans.
///
/// Threshold and interval work keys off a faster reference pace, expressed
/// through the rule multiplier (the reciprocal of the short-race factor).
fn standard_pace_rules() -> HashMap<String, PaceRule> {
    HashMap::from([
        (
            "race".into(),
            PaceRule {
                mode: AdjustmentMode::Race,
                fast: 0.0,
                slow: 0.0,
                multiplier: None,
                description: "Goal race pace. Practice fueling and rhythm at this effort.".into(),
            },
        ),
        (
            "long_run".into(),
            PaceRule {
                mode: AdjustmentMode::Pct,
                fast: 10.0,
                slow: 20.0,
                multiplier: None,
                description: "Long runs build endurance. Start at the slow end and finish strong."
                    .into(),
            },
        ),
        (
            "general_aerobic".into(),
            PaceRule {
                mode: AdjustmentMode::Pct,
                fast: 15.0,
                slow: 25.0,
                multiplier: None,
                description: "Moderate-effort mileage that builds the aerobic base.".into(),
            },
        ),
        (
            "recovery".into(),
            PaceRule {
                mode: AdjustmentMode::Pct,
                fast: 25.0,
                slow: 40.0,
                multiplier: None,
                description: "Very easy running. Effort should stay conversational throughout."
                    .into(),
            },
        ),
        (
            "lactate_threshold".into(),
            PaceRule {
                mode: AdjustmentMode::Pct,
                fast: 10.0,
                slow: 15.0,
                multiplier: Some(0.943),
                description: "Comfortably hard running at roughly one-hour race effort.".into(),
            },
        ),
        (
            "interval".into(),
            PaceRule {
                mode: AdjustmentMode::Time,
                fast: -45.0,
                slow: -30.0,
                multiplier: Some(0.943),
                description: "VO2max repeats of 600m to 1200m with jog recoveries.".into(),
            },
        ),
    ])
}

fn build_default_catalog_internal() -> Catalog {
    let mut plans = HashMap::new();

    // ========================================================================
    // Marathon, 12 weeks
    // ========================================================================

    plans.insert(
        "marathon_12".into(),
        Plan {
            id: "marathon_12".into(),
            name: "Marathon 12/40".into(),
            description: "A 12-week marathon build peaking around 40 miles per week, \
                          for runners starting from a 25 mile per week base."
                .into(),
            distance: RaceDistance::Marathon,
            workout_types: standard_workout_types(),
            paces: standard_pace_rules(),
            weeks: vec![
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("lactate_threshold", 5.0, "2 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 3.0),
                    day("long_run", 8.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("lactate_threshold", 5.0, "2 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 3.0),
                    day("long_run", 9.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("interval", 5.0, "5 x 600m"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 3.0),
                    day("long_run", 10.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("lactate_threshold", 6.0, "3 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 3.0),
                    day("long_run", 11.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("interval", 6.0, "6 x 800m"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 4.0),
                    day("long_run", 12.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("lactate_threshold", 7.0, "4 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 6.0),
                    day("recovery", 4.0),
                    day("long_run", 13.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("interval", 7.0, "5 x 1000m"),
                    day("rest", 0.0),
                    day("general_aerobic", 6.0),
                    day("recovery", 4.0),
                    day("long_run", 14.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 6.0),
                    day_note("lactate_threshold", 7.0, "4 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 6.0),
                    day("recovery", 4.0),
                    day_note("long_run", 16.0, "Practice race-day fueling"),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 6.0),
                    day_note("interval", 7.0, "6 x 1000m"),
                    day("rest", 0.0),
                    day("general_aerobic", 6.0),
                    day("recovery", 4.0),
                    day_note("long_run", 18.0, "Longest run of the plan"),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("lactate_threshold", 6.0, "3 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 4.0),
                    day("long_run", 14.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("interval", 5.0, "4 x 600m"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 3.0),
                    day("long_run", 10.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("recovery", 4.0),
                    day_note("general_aerobic", 4.0, "2 mi at race pace"),
                    day("rest", 0.0),
                    day("recovery", 3.0),
                    day("rest", 0.0),
                    day_note("race", 26.2, "Race day"),
                ],
            ],
        },
    );

    // ========================================================================
    // Half marathon, 10 weeks
    // ========================================================================

    plans.insert(
        "half_marathon_10".into(),
        Plan {
            id: "half_marathon_10".into(),
            name: "Half Marathon 10/30".into(),
            description: "A 10-week half marathon build peaking around 30 miles per week."
                .into(),
            distance: RaceDistance::HalfMarathon,
            workout_types: standard_workout_types(),
            paces: standard_pace_rules(),
            weeks: vec![
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 3.0),
                    day_note("lactate_threshold", 4.0, "2 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 3.0),
                    day("recovery", 2.0),
                    day("long_run", 6.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 3.0),
                    day_note("lactate_threshold", 4.0, "2 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 2.0),
                    day("long_run", 7.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("interval", 4.0, "5 x 600m"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 2.0),
                    day("long_run", 8.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("lactate_threshold", 5.0, "3 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 3.0),
                    day("long_run", 8.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("interval", 5.0, "6 x 800m"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 3.0),
                    day("long_run", 9.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("lactate_threshold", 5.0, "3 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 3.0),
                    day("long_run", 10.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("interval", 5.0, "5 x 1000m"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 3.0),
                    day("long_run", 11.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day_note("lactate_threshold", 5.0, "3 mi at threshold pace"),
                    day("rest", 0.0),
                    day("general_aerobic", 5.0),
                    day("recovery", 3.0),
                    day_note("long_run", 12.0, "Longest run of the plan"),
                ],
                vec![
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day_note("interval", 4.0, "4 x 800m"),
                    day("rest", 0.0),
                    day("general_aerobic", 4.0),
                    day("recovery", 3.0),
                    day("long_run", 8.0),
                ],
                vec![
                    day("rest", 0.0),
                    day("recovery", 3.0),
                    day_note("general_aerobic", 3.0, "2 mi at race pace"),
                    day("rest", 0.0),
                    day("recovery", 2.0),
                    day("rest", 0.0),
                    day_note("race", 13.1, "Race day"),
                ],
            ],
        },
    );

    Catalog { plans }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, plan) in &self.plans {
            if id.is_empty() || plan.id.is_empty() {
                errors.push("Plan has empty ID".to_string());
            }
            if id != &plan.id {
                errors.push(format!(
                    "Plan key '{}' doesn't match plan.id '{}'",
                    id, plan.id
                ));
            }
            if plan.name.is_empty() {
                errors.push(format!("Plan '{}' has empty name", id));
            }
            if plan.weeks.is_empty() {
                errors.push(format!("Plan '{}' has no weeks", id));
            }

            for (week_index, week) in plan.weeks.iter().enumerate() {
                if week.len() != 7 {
                    errors.push(format!(
                        "Plan '{}' week {} has {} days, expected 7",
                        id,
                        week_index + 1,
                        week.len()
                    ));
                }

                // Volume summation is unit-agnostic, so a week must not mix units
                if let Some(first) = week.first() {
                    if week.iter().any(|w| w.distance_unit != first.distance_unit) {
                        errors.push(format!(
                            "Plan '{}' week {} mixes distance units",
                            id,
                            week_index + 1
                        ));
                    }
                }

                for workout in week {
                    if workout.distance < 0.0 {
                        errors.push(format!(
                            "Plan '{}' week {} has a negative distance",
                            id,
                            week_index + 1
                        ));
                    }
                    if !plan.workout_types.contains_key(&workout.workout_type) {
                        errors.push(format!(
                            "Plan '{}' references unlabeled workout type '{}'",
                            id, workout.workout_type
                        ));
                    }
                }
            }

            for (name, rule) in &plan.paces {
                if rule.description.is_empty() {
                    errors.push(format!("Plan '{}' pace '{}' has empty description", id, name));
                }
                if let Some(multiplier) = rule.multiplier {
                    if multiplier <= 0.0 {
                        errors.push(format!(
                            "Plan '{}' pace '{}' has non-positive multiplier",
                            id, name
                        ));
                    }
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.plans.len(), 2);
        assert!(catalog.plans.contains_key("marathon_12"));
        assert!(catalog.plans.contains_key("half_marathon_10"));
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_every_week_has_seven_days() {
        let catalog = build_default_catalog();
        for plan in catalog.plans.values() {
            for week in &plan.weeks {
                assert_eq!(week.len(), 7);
            }
        }
    }

    #[test]
    fn test_plans_end_with_race_day() {
        let catalog = build_default_catalog();
        for plan in catalog.plans.values() {
            let last_day = plan.weeks.last().unwrap().last().unwrap();
            assert_eq!(last_day.workout_type, "race");
            assert!(last_day.distance > 0.0);
        }
    }

    #[test]
    fn test_all_workout_types_are_labeled() {
        let catalog = build_default_catalog();
        for plan in catalog.plans.values() {
            for week in &plan.weeks {
                for workout in week {
                    assert!(
                        plan.workout_types.contains_key(&workout.workout_type),
                        "Workout type {} unlabeled in {}",
                        workout.workout_type,
                        plan.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_plans_have_race_pace_rule() {
        let catalog = build_default_catalog();
        for plan in catalog.plans.values() {
            let race = plan.paces.get("race").expect("race rule present");
            assert_eq!(race.mode, AdjustmentMode::Race);
        }
    }

    #[test]
    fn test_validation_rejects_short_week() {
        let mut catalog = build_default_catalog();
        let plan = catalog.plans.get_mut("marathon_12").unwrap();
        plan.weeks[0].pop();

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("expected 7")));
    }

    #[test]
    fn test_validation_rejects_mixed_units() {
        let mut catalog = build_default_catalog();
        let plan = catalog.plans.get_mut("marathon_12").unwrap();
        plan.weeks[0][1].distance_unit = DistanceUnit::Km;

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("mixes distance units")));
    }

    #[test]
    fn test_validation_rejects_unlabeled_type() {
        let mut catalog = build_default_catalog();
        let plan = catalog.plans.get_mut("half_marathon_10").unwrap();
        plan.weeks[0][1].workout_type = "fartlek".into();

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("unlabeled workout type")));
    }
}
