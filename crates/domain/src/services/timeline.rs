//! Availability timeline materialization.
//!
//! Turns sparse per-day availability rows into dense, gap-filled calendars.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::availability::{day_bucket, day_start, AvailabilityDay, DayEntry};

pub use crate::models::availability::AVAILABILITY_WINDOW_DAYS;

/// A contiguous run of UTC days starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    pub start: NaiveDate,
    pub days: usize,
}

impl CalendarWindow {
    pub fn new(start: NaiveDate, days: usize) -> Self {
        Self { start, days }
    }

    /// The standard window: today's UTC day plus the following 27 days.
    pub fn starting_today(now: DateTime<Utc>) -> Self {
        Self::new(day_bucket(now), AVAILABILITY_WINDOW_DAYS)
    }

    /// UTC midnight of the first day.
    pub fn start_instant(&self) -> DateTime<Utc> {
        day_start(self.start)
    }

    /// First day after the window (exclusive bound).
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.days as i64)
    }

    /// Position of `date` within the window.
    pub fn offset_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.start).num_days();
        if offset >= 0 && (offset as usize) < self.days {
            Some(offset as usize)
        } else {
            None
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).map(move |i| self.start + Duration::days(i as i64))
    }
}

/// Builds one dense calendar per target user.
///
/// `rows` is the result of a single range read for all targets. Every target
/// gets exactly `window.days` entries in ascending order, whether or not it has
/// rows. Rows outside the window or for other users are ignored.
pub fn materialize(
    targets: &[Uuid],
    rows: &[AvailabilityDay],
    window: CalendarWindow,
) -> HashMap<Uuid, Vec<DayEntry>> {
    let mut slots: HashMap<Uuid, Vec<Option<&AvailabilityDay>>> = targets
        .iter()
        .map(|id| (*id, vec![None; window.days]))
        .collect();

    for row in rows {
        let Some(offset) = window.offset_of(row.date) else {
            continue;
        };
        if let Some(days) = slots.get_mut(&row.user_id) {
            days[offset] = Some(row);
        }
    }

    slots
        .into_iter()
        .map(|(user_id, days)| {
            let entries = window
                .dates()
                .zip(days)
                .map(|(date, slot)| match slot {
                    Some(row) => DayEntry::from_recorded(date, row.is_up, row.up_text.as_deref()),
                    None => DayEntry::not_up(date),
                })
                .collect();
            (user_id, entries)
        })
        .collect()
}

/// Convenience wrapper for a single user's calendar.
pub fn materialize_one(
    user_id: Uuid,
    rows: &[AvailabilityDay],
    window: CalendarWindow,
) -> Vec<DayEntry> {
    materialize(&[user_id], rows, window)
        .remove(&user_id)
        .unwrap_or_default()
}
