//! Domain models
//!
//! Closed schemas validated at the store boundary, replacing the loose
//! document shapes the data originally lived in.

pub mod booking;
pub mod guide;
pub mod slot;
pub mod tour;

pub use booking::{Booking, BookingRecord, CreateBooking};
pub use guide::{Guide, GuideStatus};
pub use slot::Slot;
pub use tour::{ScheduleConfig, Tour, TourScheduleInput, Weekday};
