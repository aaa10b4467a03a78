//! Conflict checks between candidate slots and committed calendars.
//!
//! Pure predicates shared by the objective function and the schedule
//! committer. All intervals are half-open `[start, end)` in fractional
//! hours, so back-to-back bookings (`end == other.start`) never conflict.
//!
//! A missing or empty calendar can never produce a conflict.

use chrono::NaiveDate;

use crate::models::{Calendar, TimeWindow};

/// Whether `[start, end)` on `date` intersects any entry of `calendar`.
pub fn overlaps(date: NaiveDate, start: f64, end: f64, calendar: Option<&Calendar>) -> bool {
    overlap_count(date, start, end, calendar) > 0
}

/// Number of entries of `calendar` on `date` that intersect `[start, end)`.
pub fn overlap_count(date: NaiveDate, start: f64, end: f64, calendar: Option<&Calendar>) -> usize {
    let Some(calendar) = calendar else {
        return 0;
    };
    let candidate = TimeWindow::new(start, end);
    calendar
        .entries_on(date)
        .filter(|entry| entry.window().overlaps(&candidate))
        .count()
}

/// Occupied windows of `calendar` on `date`.
pub fn same_day_windows(date: NaiveDate, calendar: Option<&Calendar>) -> Vec<TimeWindow> {
    calendar
        .map(|c| c.entries_on(date).map(|e| e.window()).collect())
        .unwrap_or_default()
}

/// Whether `candidate` fits into a free gap of a day's bookings.
///
/// Bookings are sorted by start; the candidate fits if it ends before the
/// first booking starts, lies entirely inside a gap between consecutive
/// bookings, or starts after every booking has ended. Overlapping
/// bookings are merged, so a gap only exists where nobody is busy.
pub fn fits_within_day(candidate: &TimeWindow, same_day: &[TimeWindow]) -> bool {
    if same_day.is_empty() {
        return true;
    }

    let mut sorted = same_day.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    if candidate.end <= sorted[0].start {
        return true;
    }

    let mut busy_until = sorted[0].end;
    for next in &sorted[1..] {
        if candidate.start >= busy_until && candidate.end <= next.start {
            return true;
        }
        busy_until = busy_until.max(next.end);
    }

    candidate.start >= busy_until
}
