//! In-memory store implementations

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::booking::Booking;
use crate::models::guide::Guide;
use crate::models::tour::Tour;
use crate::repository::{BookingStore, GuideStore, TourStore};

/// Tours keyed by id, insertion order not preserved
#[derive(Default)]
pub struct MemoryTourStore {
    tours: RwLock<HashMap<String, Tour>>,
}

#[async_trait]
impl TourStore for MemoryTourStore {
    async fn list(&self) -> AppResult<Vec<Tour>> {
        Ok(self.tours.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> AppResult<Tour> {
        self.tours
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Tour {id}")))
    }

    async fn upsert(&self, tour: Tour) -> AppResult<Tour> {
        self.tours.write().await.insert(tour.id.clone(), tour.clone());
        Ok(tour)
    }
}

#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn for_tour_date(&self, tour_id: &str, date: NaiveDate) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| b.tour_id == tour_id && b.date == date)
            .cloned()
            .collect())
    }

    async fn create(&self, booking: Booking) -> AppResult<Booking> {
        self.bookings.write().await.push(booking.clone());
        Ok(booking)
    }
}

#[derive(Default)]
pub struct MemoryGuideStore {
    guides: RwLock<Vec<Guide>>,
}

impl MemoryGuideStore {
    pub async fn seed(&self, guides: Vec<Guide>) {
        *self.guides.write().await = guides;
    }
}

#[async_trait]
impl GuideStore for MemoryGuideStore {
    async fn list(&self) -> AppResult<Vec<Guide>> {
        Ok(self.guides.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::models::tour::{MaxNotice, MinNotice, ScheduleConfig, Tour};
    use crate::repository::Repository;
    use indexmap::IndexMap;

    fn tour(id: &str) -> Tour {
        Tour {
            id: id.to_string(),
            title: "Science Hill Tour".to_string(),
            description: String::new(),
            max_attendees: 10,
            location: "Visitor center".to_string(),
            zoom_link: None,
            schedule: ScheduleConfig {
                duration_minutes: 60,
                frequency_minutes: 60,
                weekly_hours: IndexMap::new(),
                date_overrides: Vec::new(),
                registration_limit: 1,
                min_notice: MinNotice::default(),
                max_notice: MaxNotice::default(),
                buffer_minutes: 0,
            },
            session_instructions: None,
            published: true,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_tour_upsert_get_and_missing() {
        let repo = Repository::in_memory();
        repo.tours.upsert(tour("t1")).await.unwrap();
        assert_eq!(repo.tours.get("t1").await.unwrap().title, "Science Hill Tour");
        assert_eq!(repo.tours.list().await.unwrap().len(), 1);
        assert!(matches!(repo.tours.get("t2").await, Err(AppError::NotFound(_))));
    }
}
