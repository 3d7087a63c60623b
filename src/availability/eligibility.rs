//! Booking eligibility filtering
//!
//! Narrows raw candidate slots to the ones a visitor may actually book
//! right now: notice window, per-slot capacity, and the post-session
//! buffer against already-booked sessions.

use chrono::NaiveDateTime;

use crate::models::booking::BookingRecord;
use crate::models::slot::Slot;
use crate::models::tour::ScheduleConfig;

/// Filter candidates to offerable slots, preserving input order.
///
/// A slot survives when:
/// - it starts no earlier than `now + min_notice` and no later than
///   `now + max_notice` (both bounds inclusive),
/// - fewer than `registration_limit` bookings exist at its exact
///   `(date, start)`,
/// - it does not start within `buffer_minutes` after the end of any
///   booked session that day. The buffer is a one-directional
///   post-session gap and only applies against booked sessions, never
///   between grid candidates of the same tour.
///
/// An empty result is not an error; it means "no openings". Capacity is
/// a snapshot: two concurrent callers can both see a slot as open. The
/// storage layer owns that race, not this function.
pub fn filter_bookable(
    candidates: Vec<Slot>,
    config: &ScheduleConfig,
    now: NaiveDateTime,
    bookings: Option<&[BookingRecord]>,
) -> Vec<Slot> {
    let earliest = config.min_notice.earliest_bookable(now);
    let latest = config.max_notice.latest_bookable(now);

    candidates
        .into_iter()
        .filter(|slot| {
            let start = slot.start_datetime();
            if start < earliest || start > latest {
                return false;
            }
            let Some(records) = bookings else {
                return true;
            };
            if booked_count(records, slot) >= config.registration_limit {
                return false;
            }
            !within_buffer(records, slot, config)
        })
        .collect()
}

/// Confirmed bookings at this slot's exact `(date, start)`
fn booked_count(records: &[BookingRecord], slot: &Slot) -> u32 {
    records
        .iter()
        .filter(|r| r.date == slot.date && r.start_minutes == slot.start_minutes)
        .map(|r| r.count)
        .sum()
}

/// Whether the slot starts within the buffer gap after any booked
/// session's end that same date. Booked sessions run for the tour's own
/// duration.
fn within_buffer(records: &[BookingRecord], slot: &Slot, config: &ScheduleConfig) -> bool {
    if config.buffer_minutes == 0 {
        return false;
    }
    records.iter().filter(|r| r.date == slot.date).any(|r| {
        let session_end = u32::from(r.start_minutes) + config.duration_minutes;
        let start = u32::from(slot.start_minutes);
        start >= session_end && start - session_end < config.buffer_minutes
    })
}
