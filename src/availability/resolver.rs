//! Per-date availability resolution
//!
//! Decides which window source governs a calendar date and emits the raw
//! candidate slots. Precedence: blackout > date-specific override >
//! weekly recurring hours > none.

use chrono::NaiveDate;

use crate::availability::timegrid::generate_grid;
use crate::error::AppError;
use crate::models::slot::Slot;
use crate::models::tour::{ScheduleConfig, Window};

/// The window source governing one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSource<'a> {
    /// Date fully blocked, regardless of weekly hours or override slots
    Blackout,
    /// Date-specific windows replacing (not merging with) weekly hours
    Override(&'a [Window]),
    /// Default weekly recurring hours for the date's weekday
    Weekly(&'a [Window]),
    /// No windows configured for this date
    None,
}

/// Select the window source for `date` per the precedence rule
pub fn resolve_windows(config: &ScheduleConfig, date: NaiveDate) -> WindowSource<'_> {
    if let Some(o) = config.override_for(date) {
        if o.unavailable {
            return WindowSource::Blackout;
        }
        return WindowSource::Override(&o.slots);
    }
    let weekly = config.weekly_for(date);
    if weekly.is_empty() {
        WindowSource::None
    } else {
        WindowSource::Weekly(weekly)
    }
}

/// Raw candidate slots for one calendar date, before any policy
/// filtering.
///
/// Multiple windows on the same day contribute their grids in the
/// windows' authored order; no cross-window de-duplication or sorting is
/// applied. A window with `start >= end` contributes nothing and the
/// remaining windows still apply. Non-positive duration or frequency
/// yields an empty list ("no availability" renders fine; it should not
/// take the whole page down).
pub fn candidate_slots(config: &ScheduleConfig, date: NaiveDate) -> Vec<Slot> {
    if let Err(e) = check_complete(config) {
        tracing::debug!(error = %e, "no slots");
        return Vec::new();
    }
    let duration = clamp_minutes(config.duration_minutes);
    let step = clamp_minutes(config.frequency_minutes);

    let windows = match resolve_windows(config, date) {
        WindowSource::Blackout | WindowSource::None => return Vec::new(),
        WindowSource::Override(w) | WindowSource::Weekly(w) => w,
    };

    let mut slots = Vec::new();
    for window in windows {
        if let Err(e) = window.check_order() {
            tracing::warn!(%date, error = %e, "skipping invalid window");
            continue;
        }
        for start in generate_grid(window.start, window.end, duration, step) {
            slots.push(Slot::new(date, start, duration));
        }
    }
    slots
}

/// Errors unless duration and frequency are both positive
fn check_complete(config: &ScheduleConfig) -> Result<(), AppError> {
    if config.duration_minutes == 0 {
        return Err(AppError::ConfigurationIncomplete("duration is not positive".to_string()));
    }
    if config.frequency_minutes == 0 {
        return Err(AppError::ConfigurationIncomplete("frequency is not positive".to_string()));
    }
    Ok(())
}

/// Durations beyond a day can never fit a within-day window; clamping
/// keeps the u16 grid arithmetic safe.
fn clamp_minutes(m: u32) -> u16 {
    m.min(u32::from(crate::availability::timegrid::MINUTES_PER_DAY)) as u16
}
