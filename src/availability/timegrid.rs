//! Time-of-day arithmetic
//!
//! All slot math works on minutes since midnight. Configuration stores
//! times as "HH:MM" strings; the UI renders 12-hour labels.

use crate::error::{AppError, AppResult};

/// Minutes in one day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parse a "HH:MM" time-of-day into minutes since midnight.
///
/// Exactly two colon-separated numeric fields, hours in 0..=23 and
/// minutes in 0..=59. Anything else is an error, never coerced.
pub fn time_to_minutes(t: &str) -> AppResult<u16> {
    let mut fields = t.split(':');
    let (hours, minutes) = match (fields.next(), fields.next(), fields.next()) {
        (Some(h), Some(m), None) => {
            let hours: u16 = h
                .parse()
                .map_err(|_| AppError::InvalidTimeFormat(t.to_string()))?;
            let minutes: u16 = m
                .parse()
                .map_err(|_| AppError::InvalidTimeFormat(t.to_string()))?;
            (hours, minutes)
        }
        _ => return Err(AppError::InvalidTimeFormat(t.to_string())),
    };
    if hours > 23 || minutes > 59 {
        return Err(AppError::InvalidTimeFormat(t.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as a 12-hour "H:MM AM/PM" label.
///
/// Midnight is "12:00 AM", noon "12:00 PM". Values past 23:59 wrap
/// modulo 24h instead of panicking; windows crossing midnight are
/// unsupported, so wrapped labels only appear for misconfigured data.
pub fn minutes_to_display(m: u16) -> String {
    let m = m % MINUTES_PER_DAY;
    let hours24 = m / 60;
    let minutes = m % 60;
    let ampm = if hours24 >= 12 { "PM" } else { "AM" };
    let hours12 = ((hours24 + 11) % 12) + 1;
    format!("{}:{:02} {}", hours12, minutes, ampm)
}

/// Enumerate candidate session start times within a window.
///
/// Starts at `window_start` and advances by `step_minutes`; a start `s`
/// is included iff the whole session fits: `s + duration_minutes <=
/// window_end`. Empty when the duration exceeds the window.
pub fn generate_grid(
    window_start: u16,
    window_end: u16,
    duration_minutes: u16,
    step_minutes: u16,
) -> Vec<u16> {
    let mut starts = Vec::new();
    if step_minutes == 0 {
        return starts;
    }
    let mut s = window_start;
    while s + duration_minutes <= window_end {
        starts.push(s);
        s += step_minutes;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("09:30").unwrap(), 570);
        assert_eq!(time_to_minutes("9:30").unwrap(), 570);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "9", "9:", ":30", "9:3a", "24:00", "12:60", "9:30:00", "nine:30"] {
            assert!(
                matches!(time_to_minutes(bad), Err(AppError::InvalidTimeFormat(_))),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn test_display_twelve_hour() {
        assert_eq!(minutes_to_display(0), "12:00 AM");
        assert_eq!(minutes_to_display(540), "9:00 AM");
        assert_eq!(minutes_to_display(720), "12:00 PM");
        assert_eq!(minutes_to_display(905), "3:05 PM");
        assert_eq!(minutes_to_display(1439), "11:59 PM");
    }

    #[test]
    fn test_display_wraps_past_midnight() {
        assert_eq!(minutes_to_display(1440), "12:00 AM");
        assert_eq!(minutes_to_display(1500), "1:00 AM");
    }

    #[test]
    fn test_grid_counts() {
        // 09:00-12:00, 60 min sessions every 60 min -> 9:00, 10:00, 11:00
        assert_eq!(generate_grid(540, 720, 60, 60), vec![540, 600, 660]);
        // count = floor((end - start - duration) / step) + 1
        let grid = generate_grid(540, 720, 30, 45);
        assert_eq!(grid.len(), (720 - 540 - 30) / 45 + 1);
        for &s in &grid {
            assert!(s >= 540 && s + 30 <= 720);
        }
    }

    #[test]
    fn test_grid_last_start_fits_exactly() {
        // 11:00 + 60 = 12:00 <= 12:00 is included; no 12:00 start
        let grid = generate_grid(540, 720, 60, 60);
        assert_eq!(*grid.last().unwrap(), 660);
    }

    #[test]
    fn test_grid_duration_exceeds_window() {
        assert!(generate_grid(540, 600, 90, 30).is_empty());
    }

    #[test]
    fn test_grid_zero_step() {
        assert!(generate_grid(540, 720, 60, 0).is_empty());
    }

    #[test]
    fn test_grid_zero_length_window() {
        assert!(generate_grid(540, 540, 30, 30).is_empty());
    }
}
