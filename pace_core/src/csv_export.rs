//! CSV export of an assembled schedule.
//!
//! Writes one row per plan day from the same week-summary records the
//! calendar display consumes.

use crate::{Plan, Result, WeekSummary};
use std::io::Write;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct ScheduleRow<'a> {
    week: usize,
    weeks_to_goal: usize,
    date: String,
    workout: &'a str,
    distance: f64,
    unit: String,
    notes: Option<&'a str>,
}

/// Write the schedule as CSV, returning the number of day rows written
pub fn write_schedule_csv<W: Write>(
    writer: W,
    plan: &Plan,
    schedule: &[WeekSummary],
) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for week in schedule {
        for day in &week.days {
            let row = ScheduleRow {
                week: week.week_number,
                weeks_to_goal: week.weeks_remaining,
                date: day.date.to_string(),
                workout: plan.type_label(&day.workout.workout_type),
                distance: day.workout.distance,
                unit: day.workout.distance_unit.to_string(),
                notes: day.workout.notes.as_deref(),
            };
            csv_writer.serialize(row)?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    tracing::info!("Wrote {} schedule rows to CSV", rows);

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_schedule;
    use crate::catalog::build_default_catalog;

    #[test]
    fn test_one_row_per_plan_day() {
        let catalog = build_default_catalog();
        let plan = &catalog.plans["marathon_12"];
        let schedule = build_schedule(plan, "2024-06-01".parse().unwrap());

        let mut buffer = Vec::new();
        let rows = write_schedule_csv(&mut buffer, plan, &schedule).unwrap();

        assert_eq!(rows, 12 * 7);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("week,weeks_to_goal,date,workout,distance,unit,notes")
        );
        assert_eq!(lines.count(), 12 * 7);
    }

    #[test]
    fn test_race_day_row() {
        let catalog = build_default_catalog();
        let plan = &catalog.plans["marathon_12"];
        let schedule = build_schedule(plan, "2024-06-01".parse().unwrap());

        let mut buffer = Vec::new();
        write_schedule_csv(&mut buffer, plan, &schedule).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let race_row = text
            .lines()
            .find(|line| line.contains("Race"))
            .expect("race row present");
        assert!(race_row.starts_with("12,0,2024-06-01,Race,26.2,mi"));
    }
}
