//! TOML-based planner configuration.
//!
//! Holds the scheduling settings plus the project and habit declarations the
//! item expander consumes. Every field carries a serde default, so partial
//! or malformed records degrade to sensible values instead of failing the
//! load -- [`crate::error::ConfigError`] is reserved for files that cannot
//! be read or parsed at all.
//!
//! Configuration is stored at `~/.config/timecoach/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::item::{Priority, TimePreference};

/// Scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// First working hour, 0-23.
    #[serde(default = "default_working_hours_start")]
    pub working_hours_start: u32,
    /// Hour the working day ends, exclusive.
    #[serde(default = "default_working_hours_end")]
    pub working_hours_end: u32,
    /// Buffer inserted after each scheduled item.
    #[serde(default = "default_minimum_break")]
    pub minimum_break_minutes: u32,
    /// Estimate for tasks carrying no duration hint.
    #[serde(default = "default_task_block")]
    pub default_task_block_minutes: u32,
    /// Session length for projects that do not declare one.
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u32,
    /// Part of day the user does their best focused work.
    #[serde(default = "default_focus_preference")]
    pub focus_time_preference: TimePreference,
}

fn default_working_hours_start() -> u32 {
    9
}
fn default_working_hours_end() -> u32 {
    17
}
fn default_minimum_break() -> u32 {
    15
}
fn default_task_block() -> u32 {
    45
}
fn default_session_minutes() -> u32 {
    45
}
fn default_focus_preference() -> TimePreference {
    TimePreference::Morning
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            working_hours_start: default_working_hours_start(),
            working_hours_end: default_working_hours_end(),
            minimum_break_minutes: default_minimum_break(),
            default_task_block_minutes: default_task_block(),
            default_session_minutes: default_session_minutes(),
            focus_time_preference: default_focus_preference(),
        }
    }
}

impl Settings {
    /// Reject settings that would make every planning run empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.working_hours_start > 23 || self.working_hours_end > 24 {
            return Err(ConfigError::InvalidValue {
                key: "working_hours".to_string(),
                message: format!(
                    "hours must be within the day, got {}..{}",
                    self.working_hours_start, self.working_hours_end
                ),
            });
        }
        if self.working_hours_end <= self.working_hours_start {
            return Err(ConfigError::InvalidValue {
                key: "working_hours_end".to_string(),
                message: format!(
                    "working day ends ({}) before it starts ({})",
                    self.working_hours_end, self.working_hours_start
                ),
            });
        }
        Ok(())
    }
}

/// A declared multi-session project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_project_hours")]
    pub total_estimated_hours: u32,
    /// Minutes per session; falls back to `Settings::default_session_minutes`.
    #[serde(default)]
    pub session_length: Option<u32>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_project_hours() -> u32 {
    1
}

impl ProjectConfig {
    pub fn total_estimated_minutes(&self) -> u32 {
        self.total_estimated_hours * 60
    }

    pub fn session_minutes(&self, settings: &Settings) -> u32 {
        self.session_length
            .unwrap_or(settings.default_session_minutes)
            .max(1)
    }
}

/// Recurrence cadence of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    #[default]
    Daily,
    Weekly,
}

/// A declared recurring habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitConfig {
    pub name: String,
    #[serde(default)]
    pub kind: HabitKind,
    /// Occurrences per day (daily) or per week (weekly).
    #[serde(default = "default_habit_count")]
    pub count: u32,
    #[serde(default = "default_habit_minutes")]
    pub estimated_minutes: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub time_preference: TimePreference,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_habit_count() -> u32 {
    1
}
fn default_habit_minutes() -> u32 {
    30
}

/// Full planner configuration.
///
/// Serialized to/from TOML at `~/.config/timecoach/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    #[serde(default)]
    pub habits: Vec<HabitConfig>,
}

impl PlannerConfig {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = super::data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/timecoach"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from `path`. A missing file yields the defaults; an unreadable
    /// or unparseable file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to `path` as TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
