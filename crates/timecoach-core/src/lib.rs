//! # TimeCoach Core Library
//!
//! Core planning logic for TimeCoach: given tasks, recurring habits, and
//! multi-session projects plus the free/busy state of a calendar, assign
//! each unit of work to a concrete time slot while honoring priorities, due
//! dates, working hours, and time-of-day preferences.
//!
//! ## Architecture
//!
//! - **Item expansion**: configuration + raw tasks become atomic
//!   [`SchedulableItem`]s
//! - **Slot finding**: busy intervals + working hours become ordered free
//!   [`TimeSlot`]s
//! - **Scheduling**: a greedy, deterministic assigner matches items to slots
//! - **Learning**: completion/decline history improves future estimates and
//!   surfaces productivity insights
//! - **Storage**: TOML configuration and a JSON learning blob under
//!   `~/.config/timecoach/`
//!
//! The scheduler and slot finder are pure functions over an in-memory
//! snapshot; external fetches happen before a run, and calendar/task APIs
//! are the caller's concern.

pub mod classify;
pub mod error;
pub mod expand;
pub mod item;
pub mod learning;
pub mod retry;
pub mod scheduler;
pub mod slots;
pub mod storage;

pub use error::{ConfigError, CoreError, FetchError, Result, ValidationError};
pub use expand::{expand_items, TaskRecord};
pub use item::{sort_by_priority, ItemKind, Priority, SchedulableItem, TimePreference};
pub use learning::{
    EstimateAdjuster, InsightKind, LearningData, ProductivityInsight, TimeOfDay,
};
pub use scheduler::{assign, ScheduleOutcome, ScheduledItem, UnscheduledItem, UnscheduledReason};
pub use slots::{find_free_slots, BusyInterval, TimeSlot};
pub use storage::{HabitConfig, HabitKind, LearningStore, PlannerConfig, ProjectConfig, Settings};
