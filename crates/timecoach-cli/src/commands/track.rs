use std::path::PathBuf;

use chrono::{Timelike, Utc};
use clap::Subcommand;
use timecoach_core::{classify, TimeOfDay};

#[derive(Subcommand)]
pub enum TrackAction {
    /// Record a completed item
    Complete {
        /// Item title as it was scheduled
        title: String,
        /// Category override (inferred from the title when omitted)
        #[arg(long)]
        category: Option<String>,
        /// Estimated duration in minutes
        #[arg(long)]
        estimated: u32,
        /// Actual duration in minutes
        #[arg(long)]
        actual: u32,
        /// Hour of day the work happened (defaults to now)
        #[arg(long)]
        at: Option<u32>,
        /// Learning blob path override
        #[arg(long)]
        learning: Option<PathBuf>,
    },
    /// Record a declined item
    Decline {
        /// Item title
        title: String,
        /// Category override (inferred from the title when omitted)
        #[arg(long)]
        category: Option<String>,
        /// Hour of day the decline happened (defaults to now)
        #[arg(long)]
        at: Option<u32>,
        /// Learning blob path override
        #[arg(long)]
        learning: Option<PathBuf>,
    },
}

pub fn run(action: TrackAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TrackAction::Complete {
            title,
            category,
            estimated,
            actual,
            at,
            learning,
        } => {
            let store = super::open_store(learning)?;
            let mut adjuster = super::load_adjuster(&store);
            let category =
                category.unwrap_or_else(|| classify::extract_category(&title, ""));
            let tod = TimeOfDay::from_hour(at.unwrap_or_else(|| Utc::now().hour()));

            adjuster.record_completion(&title, &category, estimated, actual, tod);
            super::save_learning(&store, &adjuster);
            println!(
                "recorded completion: {title} [{category}] {estimated} -> {actual} min ({tod})"
            );
        }
        TrackAction::Decline {
            title,
            category,
            at,
            learning,
        } => {
            let store = super::open_store(learning)?;
            let mut adjuster = super::load_adjuster(&store);
            let category =
                category.unwrap_or_else(|| classify::extract_category(&title, ""));
            let tod = TimeOfDay::from_hour(at.unwrap_or_else(|| Utc::now().hour()));

            adjuster.record_decline(&category, tod);
            super::save_learning(&store, &adjuster);
            println!("recorded decline: {title} [{category}] ({tod})");
        }
    }
    Ok(())
}
