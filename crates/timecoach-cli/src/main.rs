use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timecoach-cli", version, about = "TimeCoach CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a schedule from config, tasks, and busy intervals
    Plan(commands::plan::PlanArgs),
    /// Record task outcomes for the learning model
    Track {
        #[command(subcommand)]
        action: commands::track::TrackAction,
    },
    /// Productivity insights from recorded history
    Insights(commands::insights::InsightsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Track { action } => commands::track::run(action),
        Commands::Insights(args) => commands::insights::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
