//! Item expansion: configuration + raw tasks -> schedulable items.
//!
//! Deterministic and side-effect free. Projects fan out into numbered
//! sessions, habits into dated (daily) or floating (weekly) occurrences,
//! and everything else becomes a plain task item. The estimate adjuster is
//! consulted to refine plain-task estimates before they are finalized.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify;
use crate::item::{ItemKind, SchedulableItem};
use crate::learning::EstimateAdjuster;
use crate::storage::{HabitConfig, HabitKind, ProjectConfig, Settings};

/// Days of planning horizon a daily habit is expanded across.
const HABIT_HORIZON_DAYS: u32 = 7;

/// A raw task from the external task source, before parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
}

impl TaskRecord {
    fn id_or_generated(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}

/// Expand raw tasks, projects, and habits into atomic schedulable items.
///
/// `horizon_start` anchors daily-habit target dates (the first day of the
/// plan). Expansion order is tasks first, then habits, both in input order,
/// so the output is reproducible.
pub fn expand_items(
    tasks: &[TaskRecord],
    projects: &[ProjectConfig],
    habits: &[HabitConfig],
    settings: &Settings,
    adjuster: &EstimateAdjuster,
    horizon_start: NaiveDate,
) -> Vec<SchedulableItem> {
    let mut items = Vec::new();

    for task in tasks {
        let parsed = parse_task(task, settings);

        let matching_project = projects.iter().find(|p| {
            !p.name.is_empty() && parsed.title.to_lowercase().contains(&p.name.to_lowercase())
        });

        match matching_project {
            Some(project) => expand_project_sessions(&parsed, project, settings, &mut items),
            None => {
                let mut item = parsed;
                item.estimated_minutes = adjuster.improved_estimate(
                    &item.title,
                    &item.category,
                    item.estimated_minutes,
                );
                items.push(item);
            }
        }
    }

    for habit in habits {
        expand_habit(habit, horizon_start, &mut items);
    }

    tracing::debug!(
        tasks = tasks.len(),
        habits = habits.len(),
        items = items.len(),
        "expanded schedulable items"
    );

    items
}

/// Parse one raw task into a plain task item using the text heuristics.
fn parse_task(task: &TaskRecord, settings: &Settings) -> SchedulableItem {
    let notes = task.notes.as_deref().unwrap_or("");
    let estimated =
        classify::parse_duration(notes).unwrap_or(settings.default_task_block_minutes);

    let mut item = SchedulableItem::task(task.id_or_generated(), task.title.clone(), estimated)
        .with_priority(classify::extract_priority(&task.title, notes))
        .with_category(classify::extract_category(&task.title, notes));
    item.due = task.due;
    item
}

/// Fan a project-matched task out into `ceil(total / session)` sessions.
fn expand_project_sessions(
    parsed: &SchedulableItem,
    project: &ProjectConfig,
    settings: &Settings,
    items: &mut Vec<SchedulableItem>,
) {
    let total = project.total_estimated_minutes();
    let session = project.session_minutes(settings);
    let sessions_needed = total.div_ceil(session);

    for n in 0..sessions_needed {
        let remaining = total - n * session;
        let mut item = parsed.clone();
        item.id = format!("{}-s{}", parsed.id, n + 1);
        item.kind = ItemKind::ProjectSession;
        item.estimated_minutes = session.min(remaining);
        item.priority = project.priority;
        item.session_number = Some(n + 1);
        item.total_sessions = Some(sessions_needed);
        items.push(item);
    }
}

/// Expand a habit into occurrences over the horizon.
///
/// Daily habits get one occurrence per count per day, each pinned to its day
/// with a target date. Weekly habits float: `count` occurrences anywhere in
/// the horizon.
fn expand_habit(habit: &HabitConfig, horizon_start: NaiveDate, items: &mut Vec<SchedulableItem>) {
    match habit.kind {
        HabitKind::Daily => {
            for day in 0..HABIT_HORIZON_DAYS {
                let target = horizon_start + chrono::Days::new(day as u64);
                for occurrence in 0..habit.count {
                    items.push(habit_item(
                        habit,
                        format!("{}-{}-{}", habit.name, target, occurrence),
                        Some(target),
                    ));
                }
            }
        }
        HabitKind::Weekly => {
            for occurrence in 0..habit.count {
                items.push(habit_item(
                    habit,
                    format!("{}-week-{}", habit.name, occurrence),
                    None,
                ));
            }
        }
    }
}

fn habit_item(habit: &HabitConfig, id: String, target: Option<NaiveDate>) -> SchedulableItem {
    SchedulableItem {
        id,
        title: habit.name.clone(),
        kind: ItemKind::Habit,
        estimated_minutes: habit.estimated_minutes,
        priority: habit.priority,
        category: "habit".to_string(),
        due: None,
        target_date: target,
        time_preference: habit.time_preference,
        session_number: None,
        total_sessions: None,
    }
}
