//! iCalendar export of an assembled schedule.
//!
//! Consumes the week-summary records from the calendar mapper and emits one
//! all-day event per workout day plus one spanning summary event per week.
//! Output is plain RFC 5545 text with CRLF line endings and deterministic
//! UIDs, so identical inputs produce byte-identical calendars.

use crate::{Plan, ScheduledDay, WeekSummary};
use chrono::{Days, NaiveDate};

const PRODID: &str = "-//stride//Training Plan//EN";

/// Escape text values: backslash, semicolon, comma and newline
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn date_value(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

/// Event title for one workout day: the bare type label for zero-distance
/// days, otherwise `"<label> - <distance><unit>"`
pub fn workout_summary(plan: &Plan, day: &ScheduledDay) -> String {
    let workout = &day.workout;
    let label = plan.type_label(&workout.workout_type);
    if workout.distance > 0.0 {
        format!("{} - {}{}", label, workout.distance, workout.distance_unit)
    } else {
        label.to_string()
    }
}

/// Render the whole schedule as an iCalendar document
pub fn schedule_to_ics(
    plan: &Plan,
    race_date: NaiveDate,
    schedule: &[WeekSummary],
    calendar_name: &str,
) -> String {
    let mut out = String::new();
    // DTSTAMP is pinned to race-day midnight so exports are reproducible
    let stamp = format!("{}T000000Z", date_value(race_date));

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{}", PRODID));
    push_line(&mut out, "METHOD:PUBLISH");
    push_line(
        &mut out,
        &format!("X-WR-CALNAME:{}", escape_text(calendar_name)),
    );
    push_line(
        &mut out,
        &format!(
            "X-WR-CALDESC:{}",
            escape_text(&format!("{} - Race date: {}", plan.name, race_date))
        ),
    );

    for week in schedule {
        let week_start = match week.days.first() {
            Some(day) => day.date,
            None => continue,
        };

        push_line(&mut out, "BEGIN:VEVENT");
        push_line(
            &mut out,
            &format!("UID:{}-week{}@stride", plan.id, week.week_number),
        );
        push_line(&mut out, &format!("DTSTAMP:{}", stamp));
        push_line(
            &mut out,
            &format!("DTSTART;VALUE=DATE:{}", date_value(week_start)),
        );
        push_line(
            &mut out,
            &format!(
                "DTEND;VALUE=DATE:{}",
                date_value(week_start + Days::new(7))
            ),
        );
        push_line(
            &mut out,
            &format!(
                "SUMMARY:{}",
                escape_text(&format!(
                    "{} weeks to goal ({} miles)",
                    week.weeks_remaining, week.total_volume
                ))
            ),
        );
        push_line(
            &mut out,
            &format!(
                "DESCRIPTION:{}",
                escape_text(&format!(
                    "Week {} - {} miles",
                    week.week_number, week.total_volume
                ))
            ),
        );
        push_line(&mut out, "END:VEVENT");

        for (day_index, day) in week.days.iter().enumerate() {
            let mut description = format!("{}{}", day.workout.distance, day.workout.distance_unit);
            if let Some(ref notes) = day.workout.notes {
                description.push_str(" - ");
                description.push_str(notes);
            }

            push_line(&mut out, "BEGIN:VEVENT");
            push_line(
                &mut out,
                &format!(
                    "UID:{}-week{}-day{}@stride",
                    plan.id,
                    week.week_number,
                    day_index + 1
                ),
            );
            push_line(&mut out, &format!("DTSTAMP:{}", stamp));
            push_line(
                &mut out,
                &format!("DTSTART;VALUE=DATE:{}", date_value(day.date)),
            );
            push_line(
                &mut out,
                &format!("DTEND;VALUE=DATE:{}", date_value(day.date + Days::new(1))),
            );
            push_line(
                &mut out,
                &format!("SUMMARY:{}", escape_text(&workout_summary(plan, day))),
            );
            push_line(
                &mut out,
                &format!("DESCRIPTION:{}", escape_text(&description)),
            );
            push_line(&mut out, "END:VEVENT");
        }
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_schedule;
    use crate::{DistanceUnit, Plan, RaceDistance, Workout};
    use std::collections::HashMap;

    fn day(workout_type: &str, distance: f64, notes: Option<&str>) -> Workout {
        Workout {
            workout_type: workout_type.into(),
            distance,
            distance_unit: DistanceUnit::Mi,
            notes: notes.map(Into::into),
        }
    }

    fn one_week_plan() -> Plan {
        Plan {
            id: "test_plan".into(),
            name: "Test Plan".into(),
            description: "A test training plan".into(),
            distance: RaceDistance::Marathon,
            workout_types: HashMap::from([
                ("rest".into(), "Rest".into()),
                ("long_run".into(), "Long Run".into()),
                ("race".into(), "Race".into()),
            ]),
            paces: HashMap::new(),
            weeks: vec![vec![
                day("rest", 0.0, None),
                day("long_run", 8.0, Some("steady effort")),
                day("rest", 0.0, None),
                day("long_run", 4.0, None),
                day("rest", 0.0, None),
                day("rest", 0.0, None),
                day("race", 26.2, None),
            ]],
        }
    }

    fn export() -> String {
        let plan = one_week_plan();
        let race_date = "2024-06-01".parse().unwrap();
        let schedule = build_schedule(&plan, race_date);
        schedule_to_ics(&plan, race_date, &schedule, "Training Plan")
    }

    #[test]
    fn test_one_event_per_day_plus_week_summary() {
        let ics = export();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 8);
        assert_eq!(ics.matches("END:VEVENT").count(), 8);
    }

    #[test]
    fn test_calendar_envelope() {
        let ics = export();
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("METHOD:PUBLISH\r\n"));
        assert!(ics.contains("X-WR-CALNAME:Training Plan\r\n"));
        assert!(ics.contains("X-WR-CALDESC:Test Plan - Race date: 2024-06-01\r\n"));
    }

    #[test]
    fn test_week_summary_event() {
        let ics = export();
        assert!(ics.contains("SUMMARY:0 weeks to goal (38.2 miles)\r\n"));
        assert!(ics.contains("DESCRIPTION:Week 1 - 38.2 miles\r\n"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20240526\r\n"));
        assert!(ics.contains("DTEND;VALUE=DATE:20240602\r\n"));
    }

    #[test]
    fn test_day_event_titles() {
        let ics = export();
        // Distance-less days show the bare label
        assert!(ics.contains("SUMMARY:Rest\r\n"));
        assert!(ics.contains("SUMMARY:Long Run - 8mi\r\n"));
        assert!(ics.contains("SUMMARY:Race - 26.2mi\r\n"));
        // Notes are appended to the description
        assert!(ics.contains("DESCRIPTION:8mi - steady effort\r\n"));
    }

    #[test]
    fn test_race_day_is_all_day_event_on_race_date() {
        let ics = export();
        assert!(ics.contains("UID:test_plan-week1-day7@stride\r\n"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20240601\r\n"));
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(escape_text("a,b;c\nd"), "a\\,b\\;c\\nd");
        assert_eq!(escape_text(r"back\slash"), r"back\\slash");
    }
}
