//! Guide matching service
//!
//! Finds active guides whose office hours overlap a booked session so
//! they can be invited to the calendar event.

use chrono::NaiveDate;

use crate::availability::timegrid::time_to_minutes;
use crate::error::AppResult;
use crate::models::guide::{Guide, GuideStatus};
use crate::models::tour::Weekday;
use crate::repository::Repository;
use crate::services::calendar::Attendee;

#[derive(Clone)]
pub struct GuidesService {
    repository: Repository,
}

impl GuidesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Guide>> {
        self.repository.guides.list().await
    }

    /// Active guides with an email whose office hours overlap the
    /// session `[start_minutes, end_minutes)` on `date`. Office-hour
    /// entries that fail to parse are skipped.
    pub async fn available_for(
        &self,
        date: NaiveDate,
        start_minutes: u16,
        end_minutes: u16,
    ) -> AppResult<Vec<Guide>> {
        let day = Weekday::of(date);
        let guides = self.repository.guides.list().await?;
        let available = guides
            .into_iter()
            .filter(|g| {
                if g.email.trim().is_empty() {
                    tracing::debug!(guide = %g.name, "skipping guide without email");
                    return false;
                }
                if g.status != GuideStatus::Active {
                    return false;
                }
                let Some(hours) = g.office_hours.get(&day) else {
                    return false;
                };
                if !hours.available {
                    return false;
                }
                hours.time_slots.iter().any(|slot| {
                    match (time_to_minutes(&slot.start), time_to_minutes(&slot.end)) {
                        (Ok(s), Ok(e)) => s < end_minutes && start_minutes < e,
                        _ => {
                            tracing::warn!(
                                guide = %g.name,
                                start = %slot.start,
                                end = %slot.end,
                                "skipping unparsable office-hours slot"
                            );
                            false
                        }
                    }
                })
            })
            .collect();
        Ok(available)
    }
}

/// Drop attendees with missing or repeated emails, and any listed in
/// `exclude` (comparison is trimmed and case-insensitive)
pub fn dedupe_attendees(attendees: Vec<Attendee>, exclude: &[&str]) -> Vec<Attendee> {
    let mut seen: Vec<String> = exclude
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();
    let mut out = Vec::new();
    for a in attendees {
        let email = a.email.trim().to_lowercase();
        if email.is_empty() || seen.contains(&email) {
            continue;
        }
        seen.push(email);
        out.push(Attendee { email: a.email.trim().to_string(), display_name: a.display_name });
    }
    out
}
