//! Free-slot detection within working hours.
//!
//! Turns a list of busy intervals (which may overlap each other) into an
//! ordered list of free [`TimeSlot`]s, clipped to the configured working
//! hours and skipping weekends.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::storage::Settings;

/// Slots shorter than this are not worth scheduling into.
pub const MIN_SLOT_MINUTES: i64 = 15;

/// An externally reported occupied time range. Intervals may overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Reject inverted or empty intervals before they reach the sweep.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end <= self.start {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// A contiguous free interval within working hours.
///
/// Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether an item of `minutes` duration fits in this slot.
    pub fn can_fit(&self, minutes: u32) -> bool {
        self.duration_minutes() >= minutes as i64
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    Some(date.and_hms_opt(hour, 0, 0)?.and_utc())
}

/// Find free slots between `range_start` and `range_end`.
///
/// For each weekday in the range, clips to
/// `[working_hours_start, working_hours_end)` and sweeps a cursor over the
/// busy intervals intersecting that window. Overlapping busy intervals are
/// absorbed by advancing the cursor with `max`, so overlaps never produce
/// negative-duration slots. Weekend days and fully busy days simply yield
/// nothing.
///
/// Output is ascending by start and non-overlapping.
pub fn find_free_slots(
    busy: &[BusyInterval],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    settings: &Settings,
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let work_start = settings.working_hours_start.min(23);
    let work_end = settings.working_hours_end.min(24);
    if work_end <= work_start {
        return slots;
    }

    let mut date = range_start.date_naive();
    loop {
        let Some(window_start) = at_hour(date, work_start) else {
            break;
        };
        if window_start >= range_end {
            break;
        }
        let window_end = match at_hour(date, work_end).or_else(|| {
            // working_hours_end == 24 means end of day
            at_hour(date.succ_opt()?, 0)
        }) {
            Some(end) => end,
            None => break,
        };

        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            collect_day_slots(busy, window_start, window_end, &mut slots);
        }

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    slots
}

/// Sweep one day's working window, emitting free slots around busy intervals.
fn collect_day_slots(
    busy: &[BusyInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    slots: &mut Vec<TimeSlot>,
) {
    let mut day_busy: Vec<&BusyInterval> = busy
        .iter()
        .filter(|b| b.start < window_end && b.end > window_start)
        .collect();
    day_busy.sort_by_key(|b| b.start);

    let mut cursor = window_start;
    for interval in day_busy {
        if cursor < interval.start {
            push_if_long_enough(slots, cursor, interval.start);
        }
        cursor = cursor.max(interval.end);
    }

    if cursor < window_end {
        push_if_long_enough(slots, cursor, window_end);
    }
}

fn push_if_long_enough(slots: &mut Vec<TimeSlot>, start: DateTime<Utc>, end: DateTime<Utc>) {
    let slot = TimeSlot { start, end };
    if slot.duration_minutes() >= MIN_SLOT_MINUTES {
        slots.push(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn settings() -> Settings {
        Settings::default() // 9-17, break 15
    }

    fn busy(start: DateTime<Utc>, end: DateTime<Utc>) -> BusyInterval {
        BusyInterval { start, end }
    }

    // 2026-03-02 is a Monday.
    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
    }

    #[test]
    fn busy_interval_validation() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        assert!(busy(start, start + chrono::Duration::hours(1)).validate().is_ok());
        assert!(busy(start, start).validate().is_err());
        assert!(busy(start, start - chrono::Duration::hours(1)).validate().is_err());
    }

    #[test]
    fn free_weekday_yields_single_full_slot() {
        let start = monday();
        let end = start + chrono::Duration::days(1);
        let slots = find_free_slots(&[], start, end, &settings());
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        assert_eq!(slots[0].end, Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap());
        assert_eq!(slots[0].duration_minutes(), 480);
    }

    #[test]
    fn one_busy_interval_splits_the_day() {
        let start = monday();
        let end = start + chrono::Duration::days(1);
        let b = busy(
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap(),
        );
        let slots = find_free_slots(&[b], start, end, &settings());
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].duration_minutes(), 60);
        assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:00");
        assert_eq!(slots[1].duration_minutes(), 360);
        assert_eq!(slots[1].start.format("%H:%M").to_string(), "11:00");
    }

    #[test]
    fn overlapping_busy_intervals_are_absorbed() {
        let start = monday();
        let end = start + chrono::Duration::days(1);
        let intervals = vec![
            busy(
                Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap(),
            ),
            busy(
                Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 3, 2, 13, 0, 0).unwrap(),
            ),
        ];
        let slots = find_free_slots(&intervals, start, end, &settings());
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].end, intervals[0].start);
        assert_eq!(slots[1].start, intervals[1].end);
        for slot in &slots {
            assert!(slot.start < slot.end);
        }
    }

    #[test]
    fn fully_busy_day_yields_nothing() {
        let start = monday();
        let end = start + chrono::Duration::days(1);
        let b = busy(
            Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap(),
        );
        let slots = find_free_slots(&[b], start, end, &settings());
        assert!(slots.is_empty());
    }

    #[test]
    fn weekends_are_skipped() {
        // 2026-03-07 Saturday, 2026-03-08 Sunday
        let start = Utc.with_ymd_and_hms(2026, 3, 7, 0, 0, 0).unwrap();
        let end = start + chrono::Duration::days(2);
        let slots = find_free_slots(&[], start, end, &settings());
        assert!(slots.is_empty());
    }

    #[test]
    fn sub_floor_gap_is_dropped() {
        let start = monday();
        let end = start + chrono::Duration::days(1);
        // 10 free minutes before the meeting: below the 15-minute floor
        let b = busy(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 10, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap(),
        );
        let slots = find_free_slots(&[b], start, end, &settings());
        assert!(slots.is_empty());
    }

    #[test]
    fn week_range_produces_ordered_nonoverlapping_slots() {
        let start = monday();
        let end = start + chrono::Duration::days(7);
        let slots = find_free_slots(&[], start, end, &settings());
        // Mon-Fri of the first week plus the following Monday's window start
        // falls outside the range only if range ends exactly at midnight.
        assert_eq!(slots.len(), 5);
        for pair in slots.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
}
