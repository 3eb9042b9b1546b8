use std::path::PathBuf;

use clap::Subcommand;
use timecoach_core::PlannerConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show {
        /// Config file override
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default config file location
    Path,
    /// Write a default config file if none exists
    Init {
        /// Config file override
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { config } => {
            let config = super::load_config(config)?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", PlannerConfig::default_path()?.display());
        }
        ConfigAction::Init { config } => {
            let path = match config {
                Some(p) => p,
                None => PlannerConfig::default_path()?,
            };
            if path.exists() {
                eprintln!("config already exists at {}", path.display());
                std::process::exit(1);
            }
            PlannerConfig::default().save(&path)?;
            println!("wrote default config to {}", path.display());
        }
    }
    Ok(())
}
