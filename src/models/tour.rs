//! Tour model and schedule configuration
//!
//! A tour is authored in the admin UI with human units (duration in
//! minutes or hours, notice in hours/days/weeks, ...). The raw input is
//! validated and normalized into [`ScheduleConfig`] before it ever
//! reaches the availability engine.

use chrono::{Datelike, DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::availability::timegrid::time_to_minutes;
use crate::error::{AppError, AppResult};

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Weekday
// ---------------------------------------------------------------------------

/// Day of week, serialized as the lowercase names the tour documents use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Weekday of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Unit for session duration, slot frequency and buffer time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Minutes,
    Hours,
}

impl DurationUnit {
    pub fn to_minutes(self, amount: u32) -> u32 {
        match self {
            DurationUnit::Minutes => amount,
            DurationUnit::Hours => amount * 60,
        }
    }
}

/// Unit for the minimum-notice policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MinNoticeUnit {
    #[default]
    Hours,
    Days,
    Weeks,
}

/// Unit for the maximum-notice policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaxNoticeUnit {
    #[default]
    Days,
    Weeks,
    Months,
}

/// How soon a slot may be booked relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MinNotice {
    pub amount: u32,
    pub unit: MinNoticeUnit,
}

impl MinNotice {
    /// Earliest bookable instant given the current one
    pub fn earliest_bookable(&self, now: NaiveDateTime) -> NaiveDateTime {
        let amount = i64::from(self.amount);
        now + match self.unit {
            MinNoticeUnit::Hours => Duration::hours(amount),
            MinNoticeUnit::Days => Duration::days(amount),
            MinNoticeUnit::Weeks => Duration::weeks(amount),
        }
    }
}

/// How far out a slot may be booked relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxNotice {
    pub amount: u32,
    pub unit: MaxNoticeUnit,
}

impl Default for MaxNotice {
    fn default() -> Self {
        Self { amount: 1, unit: MaxNoticeUnit::Months }
    }
}

impl MaxNotice {
    /// Latest bookable instant given the current one.
    ///
    /// Months use calendar-month addition, clamping to the last day of a
    /// short month; days and weeks are exact durations.
    pub fn latest_bookable(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.unit {
            MaxNoticeUnit::Days => now + Duration::days(i64::from(self.amount)),
            MaxNoticeUnit::Weeks => now + Duration::weeks(i64::from(self.amount)),
            MaxNoticeUnit::Months => now
                .checked_add_months(Months::new(self.amount))
                .unwrap_or(NaiveDateTime::MAX),
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule input (as authored)
// ---------------------------------------------------------------------------

/// A {start, end} time-of-day range, as authored ("HH:MM" strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WindowInput {
    #[validate(custom(function = validate_time_field))]
    pub start: String,
    #[validate(custom(function = validate_time_field))]
    pub end: String,
}

fn validate_time_field(value: &str) -> Result<(), ValidationError> {
    if TIME_RE.is_match(value) && time_to_minutes(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("time_format"))
    }
}

/// A per-calendar-date exception: either a blackout or a replacement set
/// of windows for that date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DateOverrideInput {
    /// Date (YYYY-MM-DD)
    pub date: String,
    #[validate(nested)]
    #[serde(default)]
    pub slots: Vec<WindowInput>,
    /// Fully blocks the date regardless of `slots` or weekly hours
    #[serde(default)]
    pub unavailable: bool,
}

/// Tour scheduling configuration as authored in the admin UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TourScheduleInput {
    /// Session length
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration: u32,
    #[serde(default)]
    pub duration_unit: DurationUnit,
    /// Step between successive slot start times
    #[validate(range(min = 1, message = "Frequency must be positive"))]
    pub frequency: u32,
    #[serde(default)]
    pub frequency_unit: DurationUnit,
    /// Default windows keyed by weekday; absent or empty means closed
    #[serde(default)]
    pub weekly_hours: IndexMap<Weekday, Vec<WindowInput>>,
    /// Per-date exceptions; at most one per calendar date
    #[validate(nested)]
    #[serde(default)]
    pub date_specific_hours: Vec<DateOverrideInput>,
    /// Max confirmed bookings per slot instance
    #[validate(range(min = 1, message = "Registration limit must be at least 1"))]
    #[serde(default = "default_registration_limit")]
    pub registration_limit: u32,
    #[serde(default)]
    pub min_notice: u32,
    #[serde(default)]
    pub min_notice_unit: MinNoticeUnit,
    #[serde(default = "default_max_notice")]
    pub max_notice: u32,
    #[serde(default)]
    pub max_notice_unit: MaxNoticeUnit,
    /// Minimum gap after a booked session before another may start
    #[serde(default)]
    pub buffer_time: u32,
    #[serde(default)]
    pub buffer_unit: DurationUnit,
}

fn default_registration_limit() -> u32 {
    1
}

fn default_max_notice() -> u32 {
    1
}

impl TourScheduleInput {
    /// Validate and normalize into the engine's [`ScheduleConfig`].
    ///
    /// Malformed times and dates are rejected here so the editing UI gets
    /// a field-level error instead of the engine silently dropping data.
    pub fn normalize(&self) -> AppResult<ScheduleConfig> {
        self.validate()?;

        let mut weekly_hours: IndexMap<Weekday, Vec<Window>> = IndexMap::new();
        for (&day, windows) in &self.weekly_hours {
            let mut normalized = Vec::with_capacity(windows.len());
            for w in windows {
                normalized.push(Window::parse(&w.start, &w.end)?);
            }
            weekly_hours.insert(day, normalized);
        }

        let mut date_overrides: Vec<DateOverride> = Vec::with_capacity(self.date_specific_hours.len());
        for o in &self.date_specific_hours {
            let date = NaiveDate::parse_from_str(&o.date, "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("Invalid date: {}", o.date)))?;
            // A date identifies at most one override; a duplicate listed
            // before a blackout would otherwise shadow it.
            if date_overrides.iter().any(|existing| existing.date == date) {
                return Err(AppError::Validation(format!(
                    "Duplicate date-specific override for {date}"
                )));
            }
            let mut slots = Vec::with_capacity(o.slots.len());
            for w in &o.slots {
                slots.push(Window::parse(&w.start, &w.end)?);
            }
            date_overrides.push(DateOverride { date, slots, unavailable: o.unavailable });
        }

        Ok(ScheduleConfig {
            duration_minutes: self.duration_unit.to_minutes(self.duration),
            frequency_minutes: self.frequency_unit.to_minutes(self.frequency),
            weekly_hours,
            date_overrides,
            registration_limit: self.registration_limit,
            min_notice: MinNotice { amount: self.min_notice, unit: self.min_notice_unit },
            max_notice: MaxNotice { amount: self.max_notice, unit: self.max_notice_unit },
            buffer_minutes: self.buffer_unit.to_minutes(self.buffer_time),
        })
    }
}

// ---------------------------------------------------------------------------
// Normalized schedule configuration
// ---------------------------------------------------------------------------

/// A {start, end} range in minutes since midnight.
///
/// Format is validated at normalization; ordering (`start < end`) is
/// checked at resolution time so one bad window skips rather than
/// failing the whole computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: u16,
    pub end: u16,
}

impl Window {
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Ok(Self { start: time_to_minutes(start)?, end: time_to_minutes(end)? })
    }

    /// Errors unless `start < end`
    pub fn check_order(&self) -> AppResult<()> {
        if self.start >= self.end {
            return Err(AppError::InvalidWindow {
                start: crate::availability::timegrid::minutes_to_display(self.start),
                end: crate::availability::timegrid::minutes_to_display(self.end),
            });
        }
        Ok(())
    }
}

/// A normalized per-date exception
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub slots: Vec<Window>,
    pub unavailable: bool,
}

/// Normalized scheduling configuration consumed by the availability
/// engine. Immutable per query; read fresh for every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub duration_minutes: u32,
    pub frequency_minutes: u32,
    pub weekly_hours: IndexMap<Weekday, Vec<Window>>,
    pub date_overrides: Vec<DateOverride>,
    pub registration_limit: u32,
    pub min_notice: MinNotice,
    pub max_notice: MaxNotice,
    pub buffer_minutes: u32,
}

impl ScheduleConfig {
    /// The override governing `date`, if any (first match wins; the store
    /// boundary keeps at most one per date)
    pub fn override_for(&self, date: NaiveDate) -> Option<&DateOverride> {
        self.date_overrides.iter().find(|o| o.date == date)
    }

    /// Weekly windows for the weekday of `date`
    pub fn weekly_for(&self, date: NaiveDate) -> &[Window] {
        self.weekly_hours
            .get(&Weekday::of(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Tour
// ---------------------------------------------------------------------------

/// A bookable tour offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    /// Tour name
    pub title: String,
    pub description: String,
    /// Max group size per booking
    pub max_attendees: u32,
    /// Meeting point, or empty for online-only tours
    pub location: String,
    pub zoom_link: Option<String>,
    pub schedule: ScheduleConfig,
    pub session_instructions: Option<String>,
    /// Only published tours are offered to visitors
    pub published: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update tour request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTour {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Max attendees must be at least 1"))]
    pub max_attendees: u32,
    #[serde(default)]
    pub location: String,
    pub zoom_link: Option<String>,
    #[validate(nested)]
    pub schedule: TourScheduleInput,
    pub session_instructions: Option<String>,
    #[serde(default)]
    pub published: bool,
}
