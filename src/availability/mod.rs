//! Tour availability engine
//!
//! Pure, synchronous computation: given a tour's normalized schedule
//! configuration, a target date and the current instant, enumerate the
//! slots a visitor may book. Stateless between calls; safe to invoke
//! concurrently. Capacity data is a caller-supplied snapshot, so atomic
//! reservation is explicitly out of scope here (see crate docs).

pub mod eligibility;
pub mod resolver;
pub mod timegrid;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::booking::BookingRecord;
use crate::models::slot::Slot;
use crate::models::tour::ScheduleConfig;

/// Offerable slots for one tour and date.
///
/// Resolves the governing window source (blackout > date-specific
/// override > weekly hours), enumerates the start-time grid, then prunes
/// by notice window, per-slot capacity and post-session buffer. Order
/// follows the authored window order; an empty result means "no
/// openings", never an error.
pub fn compute_available_slots(
    config: &ScheduleConfig,
    date: NaiveDate,
    now: NaiveDateTime,
    existing_bookings: Option<&[BookingRecord]>,
) -> Vec<Slot> {
    let candidates = resolver::candidate_slots(config, date);
    eligibility::filter_bookable(candidates, config, now, existing_bookings)
}
