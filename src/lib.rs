//! Tourbook campus tour booking engine
//!
//! Computes bookable time slots for campus tours from a tour's schedule
//! configuration (weekly recurring hours, date-specific overrides and
//! blackouts, notice and buffer policies, per-slot capacity) and wires
//! the surrounding booking flow: tour catalog, guide matching and
//! calendar invites, behind explicit store traits.
//!
//! The availability engine ([`availability::compute_available_slots`])
//! is a pure function of its inputs: stateless, synchronous and safe to
//! call concurrently. Capacity data is a snapshot supplied by the
//! caller, so two concurrent bookings can both observe a slot as open;
//! making the capacity check and the booking write atomic is the
//! storage layer's job, not this crate's.

pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use availability::compute_available_slots;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use models::{Booking, BookingRecord, ScheduleConfig, Slot, Tour};
