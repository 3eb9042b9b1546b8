mod config;
mod learning_store;

pub use config::{HabitConfig, HabitKind, PlannerConfig, ProjectConfig, Settings};
pub use learning_store::LearningStore;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/timecoach[-dev]/` based on TIMECOACH_ENV.
///
/// Set TIMECOACH_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMECOACH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timecoach-dev")
    } else {
        base_dir.join("timecoach")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
