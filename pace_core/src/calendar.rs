//! Calendar mapping: lays a plan's (week, day) grid onto real dates.
//!
//! Dates count backward from race day: the training start anchors week 1,
//! day 1 so that day 7 of the final week lands exactly on the race date.
//! Everything here is a pure function of the plan and the race date.

use crate::{Plan, ScheduledDay, WeekSummary, Workout};
use chrono::{Days, NaiveDate};

/// Days in a plan week
pub const DAYS_PER_WEEK: usize = 7;

/// First day of training: race date minus 6 days, minus `week_count - 1`
/// whole weeks.
pub fn training_start_date(race_date: NaiveDate, week_count: usize) -> NaiveDate {
    let prior_weeks = week_count.saturating_sub(1) as u64;
    race_date - Days::new(6 + DAYS_PER_WEEK as u64 * prior_weeks)
}

/// The seven dates of one plan week, in day order
pub fn week_dates(training_start: NaiveDate, week_index: usize) -> Vec<NaiveDate> {
    let week_start = training_start + Days::new((DAYS_PER_WEEK * week_index) as u64);
    (0..DAYS_PER_WEEK as u64)
        .map(|day| week_start + Days::new(day))
        .collect()
}

/// Total distance across a week's workouts.
///
/// The sum is unit-agnostic; `Catalog::validate` enforces uniform units
/// within a week at load time.
pub fn week_volume(week: &[Workout]) -> f64 {
    week.iter().map(|workout| workout.distance).sum()
}

/// Weeks left after the given week; 0 on the race week
pub fn weeks_remaining(week_index: usize, week_count: usize) -> usize {
    week_count.saturating_sub(1).saturating_sub(week_index)
}

/// Lay the whole plan onto the calendar, in plan order.
///
/// The result pairs each week's workouts positionally with its dates and is
/// the sole artifact consumed by rendering and export.
pub fn build_schedule(plan: &Plan, race_date: NaiveDate) -> Vec<WeekSummary> {
    let week_count = plan.weeks.len();
    let training_start = training_start_date(race_date, week_count);

    tracing::debug!(
        "Scheduling '{}': {} weeks starting {}",
        plan.id,
        week_count,
        training_start
    );

    plan.weeks
        .iter()
        .enumerate()
        .map(|(week_index, week)| {
            let days = week
                .iter()
                .zip(week_dates(training_start, week_index))
                .map(|(workout, date)| ScheduledDay {
                    date,
                    workout: workout.clone(),
                })
                .collect();

            WeekSummary {
                week_number: week_index + 1,
                weeks_remaining: weeks_remaining(week_index, week_count),
                total_volume: week_volume(week),
                days,
            }
        })
        .collect()
}
