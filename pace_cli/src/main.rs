use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pace_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Training pace calculator and plan calendar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive training paces from a goal pace or finish time
    Paces {
        /// Goal pace per mile (MM:SS)
        #[arg(long, conflicts_with = "time")]
        pace: Option<String>,

        /// Goal finish time (H:MM:SS)
        #[arg(long, conflicts_with = "pace")]
        time: Option<String>,

        /// Plan id (defaults to the saved selection)
        #[arg(long)]
        plan: Option<String>,

        /// Show paces without saving the goal
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the dated training calendar
    Calendar {
        /// Plan id (defaults to the saved selection)
        #[arg(long)]
        plan: Option<String>,

        /// Race date (YYYY-MM-DD, defaults to the saved selection)
        #[arg(long)]
        race_date: Option<String>,
    },

    /// Export the calendar as an .ics or .csv file
    Export {
        /// Plan id (defaults to the saved selection)
        #[arg(long)]
        plan: Option<String>,

        /// Race date (YYYY-MM-DD, defaults to the saved selection)
        #[arg(long)]
        race_date: Option<String>,

        /// Output format (ics, csv)
        #[arg(long, default_value = "ics")]
        format: String,

        /// Output path (defaults to <plan id>-<race date>.<format>)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List available training plans
    Plans,
}

fn main() -> Result<()> {
    // Initialize logging
    pace_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Paces {
            pace,
            time,
            plan,
            dry_run,
        }) => cmd_paces(data_dir, pace, time, plan, dry_run, &config),
        Some(Commands::Calendar { plan, race_date }) => {
            cmd_calendar(data_dir, plan, race_date, &config)
        }
        Some(Commands::Export {
            plan,
            race_date,
            format,
            output,
        }) => cmd_export(data_dir, plan, race_date, format, output, &config),
        Some(Commands::Plans) => cmd_plans(),
        None => cmd_summary(data_dir, &config),
    }
}

/// Catalog access with validation, shared by every command that needs plans
fn load_catalog() -> Result<&'static Catalog> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    Ok(catalog)
}

/// Look up a plan by explicit id, falling back to the saved selection.
/// An unknown id is an error; no selection at all is `None`.
fn resolve_plan<'a>(
    catalog: &'a Catalog,
    requested: Option<&str>,
    saved: Option<&str>,
) -> Result<Option<&'a Plan>> {
    match requested.or(saved) {
        Some(id) => catalog
            .plans
            .get(id)
            .map(Some)
            .ok_or_else(|| Error::Plan(format!("Unknown plan id '{}'", id))),
        None => Ok(None),
    }
}

fn cmd_paces(
    data_dir: PathBuf,
    pace: Option<String>,
    time: Option<String>,
    plan_id: Option<String>,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let state_path = data_dir.join("state.json");
    let state = AppState::load(&state_path)?;

    let catalog = load_catalog()?;
    let plan = resolve_plan(catalog, plan_id.as_deref(), state.plan_id.as_deref())?;

    let settings = config.pace.settings();
    let distance_miles = plan
        .map(|p| settings.distance_miles(p.distance))
        .unwrap_or(settings.marathon_miles);

    // Establish the goal pace from whichever input was provided, falling
    // back to the saved goal.
    let goal_pace = if let Some(ref text) = pace {
        duration_from_input(text).ok_or_else(|| {
            Error::Duration(format!("'{}' is not a valid pace, expected MM:SS", text))
        })?
    } else if let Some(ref text) = time {
        let finish = duration_from_input(text).ok_or_else(|| {
            Error::Duration(format!("'{}' is not a valid time, expected H:MM:SS", text))
        })?;
        race_time_to_pace(&finish, distance_miles)
    } else if let Some(saved) = state.goal_pace_seconds.filter(|s| *s > 0.0) {
        Duration::from_total_seconds(saved)
    } else {
        println!("No goal set. Provide --pace MM:SS or --time H:MM:SS.");
        return Ok(());
    };

    let goal_pace_seconds = goal_pace.total_seconds();
    print_paces(plan, goal_pace_seconds, distance_miles, &settings);

    if dry_run {
        println!("\n[Dry run - not saving goal]");
        return Ok(());
    }

    AppState::update(&state_path, |state| {
        state.goal_pace_seconds = Some(goal_pace_seconds);
        if let Some(plan) = plan {
            state.plan_id = Some(plan.id.clone());
        }
        Ok(())
    })?;

    Ok(())
}

fn cmd_calendar(
    data_dir: PathBuf,
    plan_id: Option<String>,
    race_date: Option<String>,
    _config: &Config,
) -> Result<()> {
    let state_path = data_dir.join("state.json");
    let state = AppState::load(&state_path)?;

    let catalog = load_catalog()?;
    let plan = resolve_plan(catalog, plan_id.as_deref(), state.plan_id.as_deref())?;
    let race_date = parse_race_date(race_date.as_deref(), state.race_date)?;

    // Calendar needs both selections; absence is a no-op, not an error
    let Some(plan) = plan else {
        println!("No plan selected. Run `stride plans` to list the options.");
        return Ok(());
    };
    let Some(race_date) = race_date else {
        println!("No race date set. Pass --race-date YYYY-MM-DD.");
        return Ok(());
    };

    let schedule = build_schedule(plan, race_date);
    print_calendar(plan, &schedule);

    AppState::update(&state_path, |state| {
        state.plan_id = Some(plan.id.clone());
        state.race_date = Some(race_date);
        Ok(())
    })?;

    Ok(())
}

fn cmd_export(
    data_dir: PathBuf,
    plan_id: Option<String>,
    race_date: Option<String>,
    format: String,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let state_path = data_dir.join("state.json");
    let state = AppState::load(&state_path)?;

    let catalog = load_catalog()?;
    let plan = resolve_plan(catalog, plan_id.as_deref(), state.plan_id.as_deref())?;
    let race_date = parse_race_date(race_date.as_deref(), state.race_date)?;

    let Some(plan) = plan else {
        println!("No plan selected. Run `stride plans` to list the options.");
        return Ok(());
    };
    let Some(race_date) = race_date else {
        println!("No race date set. Pass --race-date YYYY-MM-DD.");
        return Ok(());
    };

    let schedule = build_schedule(plan, race_date);

    match format.as_str() {
        "ics" => {
            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("{}-{}.ics", plan.id, race_date)));
            let ics = schedule_to_ics(plan, race_date, &schedule, &config.export.calendar_name);
            std::fs::write(&path, ics)?;
            println!("✓ Wrote calendar to {}", path.display());
        }
        "csv" => {
            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("{}-{}.csv", plan.id, race_date)));
            let file = std::fs::File::create(&path)?;
            let rows = write_schedule_csv(file, plan, &schedule)?;
            println!("✓ Wrote {} schedule rows to {}", rows, path.display());
        }
        other => {
            return Err(Error::Other(format!(
                "Unknown export format '{}', expected ics or csv",
                other
            )))
        }
    }

    Ok(())
}

fn cmd_plans() -> Result<()> {
    let catalog = load_catalog()?;

    let mut plans: Vec<_> = catalog.plans.values().collect();
    plans.sort_by_key(|plan| &plan.id);

    println!("Available plans:\n");
    for plan in plans {
        println!(
            "  {:<18} {} ({}, {} weeks)",
            plan.id,
            plan.name,
            plan.distance.label(),
            plan.weeks.len()
        );
        println!("  {:<18} {}", "", plan.description);
        println!();
    }

    Ok(())
}

fn cmd_summary(data_dir: PathBuf, config: &Config) -> Result<()> {
    let state_path = data_dir.join("state.json");
    let state = AppState::load(&state_path)?;

    let catalog = load_catalog()?;
    let plan = resolve_plan(catalog, None, state.plan_id.as_deref())?;

    let mut shown = false;

    if let Some(goal) = state.goal_pace_seconds.filter(|s| *s > 0.0) {
        let settings = config.pace.settings();
        let distance_miles = plan
            .map(|p| settings.distance_miles(p.distance))
            .unwrap_or(settings.marathon_miles);
        print_paces(plan, goal, distance_miles, &settings);
        shown = true;
    }

    if let (Some(plan), Some(race_date)) = (plan, state.race_date) {
        let schedule = build_schedule(plan, race_date);
        print_calendar(plan, &schedule);
        shown = true;
    }

    if !shown {
        println!("Nothing saved yet. Try:");
        println!("  stride plans");
        println!("  stride paces --pace 8:00 --plan marathon_12");
        println!("  stride calendar --plan marathon_12 --race-date 2025-10-12");
    }

    Ok(())
}

fn parse_race_date(requested: Option<&str>, saved: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    match requested {
        Some(text) => Ok(Some(NaiveDate::parse_from_str(text, "%Y-%m-%d")?)),
        None => Ok(saved),
    }
}

fn print_paces(plan: Option<&Plan>, goal_pace_seconds: f64, distance_miles: f64, settings: &PaceSettings) {
    let goal_pace = Duration::from_total_seconds(goal_pace_seconds);
    let finish = race_pace_to_time(&goal_pace, distance_miles);
    let short_race = estimate_short_race_pace(&goal_pace, settings.short_race_factor);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TRAINING PACES");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Goal pace:         {}/mi", format_duration(&goal_pace));
    println!(
        "  Projected finish:  {} over {} mi",
        format_duration(&finish),
        distance_miles
    );
    println!(
        "  Short race ref:    {}/mi",
        format_duration(&short_race)
    );
    println!();

    let Some(plan) = plan else {
        println!("  Select a plan to see its training paces (stride plans).");
        println!();
        return;
    };

    let mut names: Vec<&String> = plan.paces.keys().collect();
    names.sort();

    for name in names {
        let rule = &plan.paces[name];
        let card = resolve_training_pace(Some(goal_pace_seconds), rule);

        println!("  {}", plan.type_label(name));
        println!("    {:<12} {}", card.pace, card.range);
        if let Some(description) = card.description {
            println!("    {}", description);
        }
        println!();
    }
}

fn print_calendar(plan: &Plan, schedule: &[WeekSummary]) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", plan.name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", plan.description);
    println!();

    for week in schedule {
        println!(
            "  Week {:<3} {} weeks to goal, {} mi",
            week.week_number, week.weeks_remaining, week.total_volume
        );

        for day in &week.days {
            let distance = if day.workout.distance > 0.0 {
                format!("{}{}", day.workout.distance, day.workout.distance_unit)
            } else {
                String::new()
            };

            println!(
                "    {}  {:<18} {:<8} {}",
                day.date,
                plan.type_label(&day.workout.workout_type),
                distance,
                day.workout.notes.as_deref().unwrap_or("")
            );
        }
        println!();
    }
}
