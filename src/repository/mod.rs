//! Store boundary
//!
//! The engine never talks to a database. Tours, bookings and the guide
//! roster come in through these traits, passed explicitly to whichever
//! service needs them instead of living behind a process-wide client.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppResult;
use crate::models::booking::Booking;
use crate::models::guide::Guide;
use crate::models::tour::Tour;

/// Read-only access to tour configuration
#[async_trait]
pub trait TourStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Tour>>;
    async fn get(&self, id: &str) -> AppResult<Tour>;
    async fn upsert(&self, tour: Tour) -> AppResult<Tour>;
}

/// Booking reads and writes.
///
/// `create` is a plain insert over whatever snapshot the caller already
/// validated against; real deployments must make the capacity check and
/// the write atomic at the storage layer (transaction or optimistic
/// concurrency), which is outside this crate's contract.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn for_tour_date(&self, tour_id: &str, date: NaiveDate) -> AppResult<Vec<Booking>>;
    async fn create(&self, booking: Booking) -> AppResult<Booking>;
}

/// Guide roster access
#[async_trait]
pub trait GuideStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Guide>>;
}

/// Main repository struct aggregating the store implementations
#[derive(Clone)]
pub struct Repository {
    pub tours: Arc<dyn TourStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub guides: Arc<dyn GuideStore>,
}

impl Repository {
    pub fn new(
        tours: Arc<dyn TourStore>,
        bookings: Arc<dyn BookingStore>,
        guides: Arc<dyn GuideStore>,
    ) -> Self {
        Self { tours, bookings, guides }
    }

    /// Repository over the bundled in-memory stores, for tests and
    /// embedders without an external document store
    pub fn in_memory() -> Self {
        Self {
            tours: Arc::new(memory::MemoryTourStore::default()),
            bookings: Arc::new(memory::MemoryBookingStore::default()),
            guides: Arc::new(memory::MemoryGuideStore::default()),
        }
    }
}
