//! Schedulable items and priority ordering.
//!
//! A [`SchedulableItem`] is the atomic unit of work the scheduler can place
//! into a single time slot: a plain task, one numbered session of a larger
//! project, or one occurrence of a recurring habit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What kind of work an item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Task,
    ProjectSession,
    Habit,
}

/// User-facing priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort weight: higher schedules first.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Preferred part of the working day for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Any,
}

impl TimePreference {
    /// Whether a slot starting at `hour` satisfies this preference.
    ///
    /// Window bounds are inclusive on both ends, matching the behavior the
    /// rest of the pipeline was tuned against.
    pub fn admits_hour(&self, hour: u32) -> bool {
        match self {
            TimePreference::Morning => (9..=12).contains(&hour),
            TimePreference::Afternoon => (12..=17).contains(&hour),
            TimePreference::Evening => (17..=20).contains(&hour),
            TimePreference::Any => true,
        }
    }
}

/// An atomic unit of work ready for slot assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulableItem {
    pub id: String,
    pub title: String,
    pub kind: ItemKind,
    pub estimated_minutes: u32,
    pub priority: Priority,
    /// Free-form tag ("coding", "habit", "general", ...)
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    /// Hard date constraint: the item must land on exactly this day.
    /// Set for daily-habit occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub time_preference: TimePreference,
    /// 1-based session number for project sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<u32>,
}

impl SchedulableItem {
    /// Plain task item with neutral defaults; builder methods refine it.
    pub fn task(id: impl Into<String>, title: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: ItemKind::Task,
            estimated_minutes,
            priority: Priority::Medium,
            category: "general".to_string(),
            due: None,
            target_date: None,
            time_preference: TimePreference::Any,
            session_number: None,
            total_sessions: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_time_preference(mut self, pref: TimePreference) -> Self {
        self.time_preference = pref;
        self
    }
}

/// Order items for greedy placement.
///
/// Stable sort: priority weight descending, then earlier due date first (an
/// item with a due date sorts before one without). Equal keys keep their
/// original relative order, which the scheduler's tie-breaking depends on
/// for reproducibility.
pub fn sort_by_priority(items: &mut [SchedulableItem]) {
    items.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| match (a.due, b.due) {
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
}
