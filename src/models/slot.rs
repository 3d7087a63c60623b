//! Offerable session instances

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::availability::timegrid::minutes_to_display;

/// A concrete offerable session: date + start + end.
///
/// Derived, never persisted; recomputed on every availability query.
/// Times are minutes since midnight in the tour's local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_minutes: u16,
    pub end_minutes: u16,
}

impl Slot {
    pub fn new(date: NaiveDate, start_minutes: u16, duration_minutes: u16) -> Self {
        Self { date, start_minutes, end_minutes: start_minutes + duration_minutes }
    }

    /// Start instant in the tour's local frame
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(time_of_day(self.start_minutes))
    }

    /// End instant in the tour's local frame
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.date.and_time(time_of_day(self.end_minutes))
    }

    /// 12-hour label for the selection UI, e.g. "9:00 AM"
    pub fn display_time(&self) -> String {
        minutes_to_display(self.start_minutes)
    }
}

fn time_of_day(minutes: u16) -> NaiveTime {
    let minutes = u32::from(minutes) % (24 * 60);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).expect("minutes in range")
}
