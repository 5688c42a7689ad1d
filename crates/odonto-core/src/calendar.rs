//! Calendar aggregation and naive local date-time range strings.
//!
//! Appointment times are fixed-width `YYYY-MM-DDTHH:mm:ss` strings with
//! no zone marker. They are grouped and sorted verbatim: the date key is
//! the first 10 characters, and lexicographic order on the full string
//! is chronological order because the format is fixed-width.

use std::collections::BTreeMap;

use jiff::civil;
use serde::Serialize;
use ts_rs::TS;

use crate::models::appointment::{Appointment, AppointmentStatus};

/// Per-day tallies for calendar rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DaySummary {
    pub count: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
    pub late: usize,
}

/// Date portion of a naive local date-time string, taken verbatim.
pub fn day_key(start_time: &str) -> &str {
    if start_time.len() >= 10 {
        &start_time[..10]
    } else {
        start_time
    }
}

/// Group a month's appointments by day, each day's list ascending by
/// start time.
pub fn group_by_day(items: &[Appointment]) -> BTreeMap<String, Vec<&Appointment>> {
    let mut map: BTreeMap<String, Vec<&Appointment>> = BTreeMap::new();
    for a in items {
        map.entry(day_key(&a.start_time).to_string())
            .or_default()
            .push(a);
    }
    for list in map.values_mut() {
        list.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }
    map
}

/// Per-day summaries: pending counts SCHEDULED and CONFIRMED, late
/// counts the server-provided `createdLate` flag.
pub fn summarize_by_day(items: &[Appointment]) -> BTreeMap<String, DaySummary> {
    let mut map: BTreeMap<String, DaySummary> = BTreeMap::new();
    for a in items {
        let s = map.entry(day_key(&a.start_time).to_string()).or_default();
        s.count += 1;
        match a.status {
            AppointmentStatus::Completed => s.completed += 1,
            AppointmentStatus::Cancelled => s.cancelled += 1,
            _ if a.status.is_pending() => s.pending += 1,
            _ => {}
        }
        if a.created_late {
            s.late += 1;
        }
    }
    map
}

/// Format a civil date-time in the backend's fixed wire format.
pub fn format_local(dt: civil::DateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

/// Inclusive from/to range covering one civil day.
pub fn day_range(date: civil::Date) -> (String, String) {
    (
        format_local(date.at(0, 0, 0, 0)),
        format_local(date.at(23, 59, 59, 0)),
    )
}

/// Inclusive from/to range covering one civil month.
pub fn month_range(year: i16, month: i8) -> (String, String) {
    let first = civil::date(year, month, 1);
    let last = first.last_of_month();
    (
        format_local(first.at(0, 0, 0, 0)),
        format_local(last.at(23, 59, 59, 0)),
    )
}

/// Today's from/to range, on the local wall clock.
pub fn today_range() -> (String, String) {
    day_range(jiff::Zoned::now().date())
}
