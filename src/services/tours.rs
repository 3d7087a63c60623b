//! Tour catalog service

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::models::tour::{CreateTour, Tour};
use crate::repository::Repository;

#[derive(Clone)]
pub struct ToursService {
    repository: Repository,
}

impl ToursService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Tours offered to visitors
    pub async fn list_published(&self) -> AppResult<Vec<Tour>> {
        Ok(self
            .repository
            .tours
            .list()
            .await?
            .into_iter()
            .filter(|t| t.published)
            .collect())
    }

    pub async fn list(&self) -> AppResult<Vec<Tour>> {
        self.repository.tours.list().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Tour> {
        self.repository.tours.get(id).await
    }

    /// Create a tour. The schedule input is validated and normalized
    /// here so malformed times reach the editing UI as field errors
    /// instead of silently producing an empty calendar.
    pub async fn create(&self, data: CreateTour) -> AppResult<Tour> {
        data.validate()?;
        let schedule = data.schedule.normalize()?;
        let tour = Tour {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            description: data.description,
            max_attendees: data.max_attendees,
            location: data.location,
            zoom_link: data.zoom_link,
            schedule,
            session_instructions: data.session_instructions,
            published: data.published,
            created_at: Some(Utc::now()),
        };
        self.repository.tours.upsert(tour).await
    }

    /// Replace an existing tour's definition, keeping its id
    pub async fn update(&self, id: &str, data: CreateTour) -> AppResult<Tour> {
        data.validate()?;
        let schedule = data.schedule.normalize()?;
        let existing = self.repository.tours.get(id).await?;
        let tour = Tour {
            id: existing.id,
            title: data.title,
            description: data.description,
            max_attendees: data.max_attendees,
            location: data.location,
            zoom_link: data.zoom_link,
            schedule,
            session_instructions: data.session_instructions,
            published: data.published,
            created_at: existing.created_at,
        };
        self.repository.tours.upsert(tour).await
    }
}
