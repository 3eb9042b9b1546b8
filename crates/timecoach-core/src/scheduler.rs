//! Greedy slot assignment.
//!
//! The scheduler walks items in priority order and places each one into the
//! best-scoring free slot that can hold it, shrinking the slot pool as it
//! goes. It is a pure function of (items, slots, settings): no I/O, no
//! randomness, fully deterministic given identical inputs. A run owns its
//! slot pool exclusively.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::item::{sort_by_priority, SchedulableItem, TimePreference};
use crate::slots::{TimeSlot, MIN_SLOT_MINUTES};
use crate::storage::Settings;

/// Bonus when the item's time preference matches the user's focus window.
const FOCUS_PREFERENCE_BONUS: f64 = 10.0;

/// Bonus for deep-work categories scheduled in a morning slot when the user
/// focuses best in the morning.
const DEEP_WORK_MORNING_BONUS: f64 = 20.0;

/// Weight of the duration-fit term.
const DURATION_FIT_WEIGHT: f64 = 5.0;

/// Cap on the slot-duration / item-duration ratio in the fit bonus, so
/// oversized slots are not always preferred.
pub const DURATION_FIT_CAP: f64 = 2.0;

/// Categories that benefit from protected morning focus time.
const DEEP_WORK_CATEGORIES: &[&str] = &["coding", "writing"];

/// An item with its committed time placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledItem {
    #[serde(flatten)]
    pub item: SchedulableItem,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    /// The free slot the placement came from, as it was when chosen.
    pub slot: TimeSlot,
}

/// Why an item could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnscheduledReason {
    NoSuitableSlot,
}

/// An item the run could not place. Never fatal; reported to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnscheduledItem {
    pub id: String,
    pub title: String,
    pub reason: UnscheduledReason,
}

/// Result of one scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// In assignment order, not necessarily time order.
    pub scheduled: Vec<ScheduledItem>,
    pub unscheduled: Vec<UnscheduledItem>,
}

/// Assign items to slots.
///
/// Items are stably ordered by priority first; slots keep their original
/// ascending order throughout, which makes the first-candidate tie-break
/// deterministic. Items that fit nowhere land in `unscheduled` and the run
/// continues.
pub fn assign(
    mut items: Vec<SchedulableItem>,
    slots: Vec<TimeSlot>,
    settings: &Settings,
) -> ScheduleOutcome {
    sort_by_priority(&mut items);

    let mut pool = slots;
    let mut outcome = ScheduleOutcome::default();

    tracing::info!(items = items.len(), slots = pool.len(), "scheduling run started");

    for item in items {
        let Some(best_index) = pick_best_slot(&item, &pool, settings) else {
            tracing::warn!(id = %item.id, title = %item.title, "no suitable slot for item");
            outcome.unscheduled.push(UnscheduledItem {
                id: item.id.clone(),
                title: item.title.clone(),
                reason: UnscheduledReason::NoSuitableSlot,
            });
            continue;
        };

        let slot = pool[best_index].clone();
        let scheduled_start = slot.start;
        let scheduled_end = scheduled_start + Duration::minutes(item.estimated_minutes as i64);
        let used = item.estimated_minutes;

        outcome.scheduled.push(ScheduledItem {
            item,
            scheduled_start,
            scheduled_end,
            slot,
        });

        shrink_slot(&mut pool, best_index, used, settings.minimum_break_minutes);
    }

    tracing::info!(
        scheduled = outcome.scheduled.len(),
        unscheduled = outcome.unscheduled.len(),
        "scheduling run complete"
    );

    outcome
}

/// Index of the highest-scoring candidate slot, or None when nothing fits.
/// Ties go to the earliest candidate in pool order.
fn pick_best_slot(item: &SchedulableItem, pool: &[TimeSlot], settings: &Settings) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, slot) in pool.iter().enumerate() {
        if !slot_matches(item, slot) {
            continue;
        }
        let score = score_slot(item, slot, settings);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Hard constraints: capacity, target date, time-preference window.
fn slot_matches(item: &SchedulableItem, slot: &TimeSlot) -> bool {
    if !slot.can_fit(item.estimated_minutes) {
        return false;
    }

    if let Some(target) = item.target_date {
        if slot.start.date_naive() != target {
            return false;
        }
    }

    item.time_preference.admits_hour(slot.start.hour())
}

/// Soft preference score for a candidate slot.
fn score_slot(item: &SchedulableItem, slot: &TimeSlot, settings: &Settings) -> f64 {
    let mut score = 0.0;

    if item.time_preference == settings.focus_time_preference {
        score += FOCUS_PREFERENCE_BONUS;
    }

    if DEEP_WORK_CATEGORIES.contains(&item.category.as_str())
        && settings.focus_time_preference == TimePreference::Morning
        && slot.start.hour() < 12
    {
        score += DEEP_WORK_MORNING_BONUS;
    }

    let fit = slot.duration_minutes() as f64 / item.estimated_minutes as f64;
    score += DURATION_FIT_WEIGHT * fit.min(DURATION_FIT_CAP);

    score
}

/// Consume the front of the chosen slot, keeping pool order stable.
///
/// The used minutes plus the configured break are carved off the slot's
/// start; if what is left clears the minimum slot floor the slot is updated
/// in place, otherwise it is removed (a stable remove, never swap-remove --
/// candidate ordering must survive for deterministic tie-breaking).
fn shrink_slot(pool: &mut Vec<TimeSlot>, index: usize, used_minutes: u32, break_minutes: u32) {
    let consumed = (used_minutes + break_minutes) as i64;
    let remainder = pool[index].duration_minutes() - consumed;

    if remainder >= MIN_SLOT_MINUTES {
        pool[index].start += Duration::minutes(consumed);
    } else {
        pool.remove(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Priority, SchedulableItem};
    use chrono::TimeZone;

    fn settings() -> Settings {
        Settings::default()
    }

    fn slot(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeSlot {
        TimeSlot {
            start: Utc.with_ymd_and_hms(2026, 3, 2, h1, m1, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 3, 2, h2, m2, 0).unwrap(),
        }
    }

    #[test]
    fn never_places_into_undersized_slot() {
        let items = vec![SchedulableItem::task("big", "Big task", 120)];
        let outcome = assign(items, vec![slot(9, 0, 10, 0)], &settings());
        assert!(outcome.scheduled.is_empty());
        assert_eq!(outcome.unscheduled.len(), 1);
        assert_eq!(outcome.unscheduled[0].reason, UnscheduledReason::NoSuitableSlot);
    }

    #[test]
    fn end_to_end_single_task_shrinks_slot() {
        // 45-minute high-priority task into a 09:00-17:00 slot, break 15:
        // placed 09:00-09:45, remainder starts 10:00 with 420 minutes left.
        let items =
            vec![SchedulableItem::task("t1", "Morning task", 45).with_priority(Priority::High)];
        let free = slot(9, 0, 17, 0);

        let outcome = assign(items, vec![free.clone()], &settings());
        assert_eq!(outcome.scheduled.len(), 1);
        let placed = &outcome.scheduled[0];
        assert_eq!(placed.scheduled_start, free.start);
        assert_eq!(
            placed.scheduled_end,
            free.start + Duration::minutes(45)
        );
        assert_eq!(placed.slot, free);
    }

    #[test]
    fn shrink_keeps_remainder_above_floor() {
        let mut pool = vec![slot(9, 0, 17, 0)];
        shrink_slot(&mut pool, 0, 45, 15);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].start, Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
        assert_eq!(pool[0].duration_minutes(), 420);
    }

    #[test]
    fn shrink_removes_slot_below_floor() {
        // 60-minute slot, 40 used + 15 break leaves 5 < 15: slot goes away
        let mut pool = vec![slot(9, 0, 10, 0), slot(11, 0, 12, 0)];
        shrink_slot(&mut pool, 0, 40, 15);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].start.hour(), 11);
    }

    #[test]
    fn target_date_restricts_candidates() {
        let tuesday = chrono::NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let items = vec![SchedulableItem::task("h", "Habit", 30).with_target_date(tuesday)];
        // Only a Monday slot available
        let outcome = assign(items, vec![slot(9, 0, 17, 0)], &settings());
        assert!(outcome.scheduled.is_empty());
        assert_eq!(outcome.unscheduled.len(), 1);
    }

    #[test]
    fn time_preference_restricts_candidates() {
        let items = vec![SchedulableItem::task("e", "Evening task", 30)
            .with_time_preference(TimePreference::Evening)];
        let outcome = assign(
            items,
            vec![slot(9, 0, 12, 0), slot(17, 0, 20, 0)],
            &settings(),
        );
        assert_eq!(outcome.scheduled.len(), 1);
        assert_eq!(outcome.scheduled[0].scheduled_start.hour(), 17);
    }

    #[test]
    fn deep_work_prefers_morning_slot() {
        let items = vec![SchedulableItem::task("c", "Debug parser", 60).with_category("coding")];
        // Afternoon slot listed first; morning bonus should still win
        let outcome = assign(
            items,
            vec![slot(13, 0, 16, 0), slot(9, 0, 12, 0)],
            &settings(),
        );
        assert_eq!(outcome.scheduled.len(), 1);
        assert_eq!(outcome.scheduled[0].scheduled_start.hour(), 9);
    }

    #[test]
    fn score_ties_go_to_first_slot_in_order() {
        let items = vec![SchedulableItem::task("t", "Task", 60)];
        // Two afternoon slots with identical scoring inputs
        let outcome = assign(
            items,
            vec![slot(13, 0, 14, 0), slot(15, 0, 16, 0)],
            &settings(),
        );
        assert_eq!(outcome.scheduled[0].scheduled_start.hour(), 13);
    }

    #[test]
    fn duration_fit_bonus_is_capped() {
        let tight = slot(13, 0, 14, 0); // ratio 1.0
        let huge = slot(14, 0, 17, 0); // ratio 3.0, capped at 2.0
        let item = SchedulableItem::task("t", "Task", 60);
        let s = settings();
        let tight_score = score_slot(&item, &tight, &s);
        let huge_score = score_slot(&item, &huge, &s);
        assert!((tight_score - 5.0).abs() < 1e-9);
        assert!((huge_score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn higher_priority_items_claim_slots_first() {
        let items = vec![
            SchedulableItem::task("low", "Low", 60).with_priority(Priority::Low),
            SchedulableItem::task("high", "High", 60).with_priority(Priority::High),
        ];
        // Only one slot big enough for one item (60 used + 15 break leaves 0)
        let outcome = assign(items, vec![slot(9, 0, 10, 0)], &settings());
        assert_eq!(outcome.scheduled.len(), 1);
        assert_eq!(outcome.scheduled[0].item.id, "high");
        assert_eq!(outcome.unscheduled[0].id, "low");
    }

    #[test]
    fn no_two_scheduled_items_overlap() {
        let items = vec![
            SchedulableItem::task("a", "A", 60),
            SchedulableItem::task("b", "B", 60),
            SchedulableItem::task("c", "C", 60),
        ];
        let outcome = assign(items, vec![slot(9, 0, 17, 0)], &settings());
        assert_eq!(outcome.scheduled.len(), 3);

        let mut spans: Vec<_> = outcome
            .scheduled
            .iter()
            .map(|s| (s.scheduled_start, s.scheduled_end))
            .collect();
        spans.sort();
        for pair in spans.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "scheduled items overlap");
        }
    }
}
