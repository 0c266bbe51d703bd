#![forbid(unsafe_code)]

//! Core domain model and business logic for the Stride training calculator.
//!
//! This crate provides:
//! - Duration arithmetic (structured durations and total seconds)
//! - Pace engine (training pace derivation from a single goal pace)
//! - Calendar mapper (plan week grid onto real dates)
//! - Plan catalog
//! - Config, app state persistence and exports

pub mod types;
pub mod error;
pub mod duration;
pub mod pace;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod state;
pub mod ical;
pub mod csv_export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use duration::{duration_from_input, format_duration, parse_duration_string};
pub use pace::{
    estimate_short_race_pace, race_pace_to_time, race_time_to_pace, resolve_training_pace,
    PaceSettings,
};
pub use calendar::build_schedule;
pub use csv_export::write_schedule_csv;
pub use ical::schedule_to_ics;
