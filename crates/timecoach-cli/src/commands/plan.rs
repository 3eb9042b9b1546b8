use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::Args;
use timecoach_core::{assign, expand_items, find_free_slots, BusyInterval, TaskRecord};

#[derive(Args)]
pub struct PlanArgs {
    /// Planner config file (defaults to ~/.config/timecoach/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSON file with raw task records
    #[arg(long)]
    pub tasks: Option<PathBuf>,
    /// JSON file with busy intervals from the calendar
    #[arg(long)]
    pub busy: Option<PathBuf>,
    /// Learning blob path override
    #[arg(long)]
    pub learning: Option<PathBuf>,
    /// Planning horizon in days, starting tomorrow
    #[arg(long, default_value_t = 7)]
    pub days: u32,
    /// Emit the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config)?;
    let store = super::open_store(args.learning)?;
    let adjuster = super::load_adjuster(&store);

    config.settings.validate()?;

    let tasks: Vec<TaskRecord> = read_json_file(args.tasks.as_deref())?;
    let busy: Vec<BusyInterval> = read_json_file(args.busy.as_deref())?;
    for interval in &busy {
        interval.validate()?;
    }

    // Plan from tomorrow midnight over the requested horizon
    let horizon_start = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    let horizon_end = horizon_start + Duration::days(args.days as i64);

    let items = expand_items(
        &tasks,
        &config.projects,
        &config.habits,
        &config.settings,
        &adjuster,
        horizon_start.date_naive(),
    );
    let slots = find_free_slots(&busy, horizon_start, horizon_end, &config.settings);
    let outcome = assign(items, slots, &config.settings);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "Planned {} item(s), {} unscheduled",
        outcome.scheduled.len(),
        outcome.unscheduled.len()
    );
    for placed in &outcome.scheduled {
        println!(
            "  {} - {}  [{}] {} ({} min)",
            placed.scheduled_start.format("%a %m-%d %H:%M"),
            placed.scheduled_end.format("%H:%M"),
            placed.item.category,
            placed.item.title,
            placed.item.estimated_minutes,
        );
    }
    if !outcome.unscheduled.is_empty() {
        println!("Unscheduled:");
        for item in &outcome.unscheduled {
            println!("  {} ({:?})", item.title, item.reason);
        }
    }
    Ok(())
}

fn read_json_file<T: serde::de::DeserializeOwned>(
    path: Option<&std::path::Path>,
) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Vec::new()),
    }
}
