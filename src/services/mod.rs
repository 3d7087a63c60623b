//! Business logic services

pub mod bookings;
pub mod calendar;
pub mod guides;
pub mod tours;

use std::sync::Arc;

use crate::config::BookingConfig;
use crate::repository::Repository;
use crate::services::calendar::CalendarClient;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tours: tours::ToursService,
    pub bookings: bookings::BookingsService,
    pub guides: guides::GuidesService,
}

impl Services {
    /// Create all services over the given stores and calendar client
    pub fn new(
        repository: Repository,
        calendar: Arc<dyn CalendarClient>,
        booking_config: BookingConfig,
    ) -> Self {
        let guides = guides::GuidesService::new(repository.clone());
        Self {
            tours: tours::ToursService::new(repository.clone()),
            bookings: bookings::BookingsService::new(
                repository,
                guides.clone(),
                calendar,
                booking_config,
            ),
            guides,
        }
    }
}
