//! Core domain types for the Stride training calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Durations and paces
//! - Pace adjustment rules and resolved pace cards
//! - Training plans and workouts
//! - Assembled schedules
//! - Persisted app state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Duration Types
// ============================================================================

/// A structured duration (hours, minutes, seconds).
///
/// Used both for race finish times and for paces (time per mile); the two
/// are distinguished only by context and display suffix. Minutes and seconds
/// are not range-validated here; boundary input validation happens before
/// parsing (see `duration::duration_from_input`).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Duration {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl Duration {
    /// Build a duration from explicit fields
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }
}

// ============================================================================
// Pace Rule Types
// ============================================================================

/// How a rule's fast/slow offsets are applied to the base pace
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentMode {
    /// The goal pace itself, displayed without a numeric range
    Race,
    /// Offsets are percentages of the base pace
    Pct,
    /// Offsets are signed seconds added to the base pace
    Time,
}

/// Derives one named training pace from the goal pace.
///
/// `fast` is the offset intended to produce the faster (numerically smaller)
/// pace and `slow` the slower one. The engine assigns output slots
/// positionally and never re-sorts by computed magnitude.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaceRule {
    pub mode: AdjustmentMode,
    #[serde(default)]
    pub fast: f64,
    #[serde(default)]
    pub slow: f64,
    /// Optional scalar applied to the goal pace before adjustment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    pub description: String,
}

/// A resolved training pace ready for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaceCard {
    /// Point value, e.g. `"08:00/mi"`
    pub pace: String,
    /// Numeric range `"<fast> - <slow>"` or the fixed race-pace marker
    pub range: String,
    pub description: Option<String>,
}

// ============================================================================
// Plan Types
// ============================================================================

/// Race distances supported by the plan catalog
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RaceDistance {
    Marathon,
    HalfMarathon,
    TenK,
    FiveK,
}

impl RaceDistance {
    /// Distance in miles (current formula generation; the marathon constant
    /// can be overridden through `PaceSettings`)
    pub fn miles(&self) -> f64 {
        match self {
            RaceDistance::Marathon => 26.218,
            RaceDistance::HalfMarathon => 13.109,
            RaceDistance::TenK => 6.214,
            RaceDistance::FiveK => 3.107,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RaceDistance::Marathon => "Marathon",
            RaceDistance::HalfMarathon => "Half Marathon",
            RaceDistance::TenK => "10K",
            RaceDistance::FiveK => "5K",
        }
    }
}

/// Unit for a workout distance
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Mi,
    Km,
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Mi => write!(f, "mi"),
            DistanceUnit::Km => write!(f, "km"),
        }
    }
}

/// A single day's workout within a plan week
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    /// Key into the plan's `workout_types` label map
    pub workout_type: String,
    pub distance: f64,
    pub distance_unit: DistanceUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A complete training plan: metadata, pace rules and the week grid.
///
/// Each week holds exactly 7 workouts in day order; the last day of the last
/// week is race day. `Catalog::validate` enforces the shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub distance: RaceDistance,
    pub workout_types: HashMap<String, String>,
    pub paces: HashMap<String, PaceRule>,
    pub weeks: Vec<Vec<Workout>>,
}

impl Plan {
    /// Display label for a workout type code, falling back to the code itself
    pub fn type_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.workout_types
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}

// ============================================================================
// Schedule Types
// ============================================================================

/// A workout paired with its calendar date
#[derive(Clone, Debug, Serialize)]
pub struct ScheduledDay {
    pub date: NaiveDate,
    pub workout: Workout,
}

/// One plan week laid onto the calendar.
///
/// The ordered sequence of these records is the sole artifact consumed by
/// rendering and export.
#[derive(Clone, Debug, Serialize)]
pub struct WeekSummary {
    pub week_number: usize,
    /// 0 on the race week
    pub weeks_remaining: usize,
    pub total_volume: f64,
    pub days: Vec<ScheduledDay>,
}

// ============================================================================
// App State
// ============================================================================

/// Persisted snapshot of the user's selections.
///
/// `goal_pace_seconds` is the single fact driving all derived output. Pace
/// and calendar computations take it as an explicit argument; nothing reads
/// it through shared state.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AppState {
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Race date, serialized as `YYYY-MM-DD`
    #[serde(default)]
    pub race_date: Option<NaiveDate>,
    #[serde(default)]
    pub goal_pace_seconds: Option<f64>,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete catalog of built-in training plans
#[derive(Clone, Debug)]
pub struct Catalog {
    pub plans: HashMap<String, Plan>,
}
