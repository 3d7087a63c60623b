//! Booking service
//!
//! Availability lookups and booking submission. Submission re-validates
//! the requested slot against a fresh availability computation before
//! writing, then fires the calendar invite as a best-effort side effect.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::availability::compute_available_slots;
use crate::config::BookingConfig;
use crate::error::{AppError, AppResult};
use crate::models::booking::{Booking, BookingRecord, CreateBooking};
use crate::models::slot::Slot;
use crate::models::tour::Tour;
use crate::repository::Repository;
use crate::services::calendar::{Attendee, CalendarClient, EventRef, EventRequest};
use crate::services::guides::{dedupe_attendees, GuidesService};

/// Outcome of a booking submission
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking: Booking,
    /// Created invite, or None when event creation failed (the booking
    /// itself is already persisted)
    pub calendar_event: Option<EventRef>,
}

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    guides: GuidesService,
    calendar: Arc<dyn CalendarClient>,
    config: BookingConfig,
}

impl BookingsService {
    pub fn new(
        repository: Repository,
        guides: GuidesService,
        calendar: Arc<dyn CalendarClient>,
        config: BookingConfig,
    ) -> Self {
        Self { repository, guides, calendar, config }
    }

    /// Offerable slots for a tour on a date, against the current booking
    /// snapshot. The snapshot is read fresh per call; no caching.
    pub async fn available_slots(
        &self,
        tour_id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<Vec<Slot>> {
        let tour = self.repository.tours.get(tour_id).await?;
        let records = self.booking_records(tour_id, date).await?;
        Ok(compute_available_slots(&tour.schedule, date, now, Some(&records)))
    }

    /// Submit a booking.
    ///
    /// The requested slot is checked against a fresh availability
    /// computation so a slot that filled up (or fell out of the notice
    /// window) since it was displayed is rejected with `Conflict`. The
    /// check and the write are not atomic; storage-layer concurrency
    /// control is the embedder's responsibility.
    pub async fn submit(
        &self,
        request: CreateBooking,
        now: NaiveDateTime,
    ) -> AppResult<BookingConfirmation> {
        request.validate()?;
        let tour = self.repository.tours.get(&request.tour_id).await?;
        if !tour.published {
            return Err(AppError::NotFound(format!("Tour {}", request.tour_id)));
        }
        if request.attendees > tour.max_attendees {
            return Err(AppError::Validation(format!(
                "Group size {} exceeds the tour maximum of {}",
                request.attendees, tour.max_attendees
            )));
        }

        let offerable = self
            .available_slots(&request.tour_id, request.date, now)
            .await?;
        let slot = offerable
            .iter()
            .find(|s| s.start_minutes == request.start_minutes)
            .copied()
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Slot {} on {} is no longer available",
                    crate::availability::timegrid::minutes_to_display(request.start_minutes),
                    request.date
                ))
            })?;

        let booking = self.repository.bookings.create(to_booking(request)).await?;

        let calendar_event = match self.create_invite(&tour, &booking, slot).await {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::error!(booking = %booking.id, error = %e, "calendar invite failed");
                None
            }
        };

        Ok(BookingConfirmation { booking, calendar_event })
    }

    async fn booking_records(&self, tour_id: &str, date: NaiveDate) -> AppResult<Vec<BookingRecord>> {
        let bookings = self.repository.bookings.for_tour_date(tour_id, date).await?;
        Ok(bookings.iter().map(Booking::to_record).collect())
    }

    async fn create_invite(
        &self,
        tour: &Tour,
        booking: &Booking,
        slot: Slot,
    ) -> AppResult<EventRef> {
        let matched = self
            .guides
            .available_for(slot.date, slot.start_minutes, slot.end_minutes)
            .await?;
        tracing::debug!(count = matched.len(), booking = %booking.id, "guides matched for session");

        let mut attendees: Vec<Attendee> = vec![Attendee {
            email: booking.email.clone(),
            display_name: Some(format!("{} {}", booking.first_name, booking.last_name)),
        }];
        let mut extra: Vec<Attendee> = matched
            .into_iter()
            .map(|g| Attendee { email: g.email, display_name: Some(g.name) })
            .collect();
        if let Some(email) = &self.config.distribution_email {
            extra.push(Attendee {
                email: email.clone(),
                display_name: self.config.distribution_name.clone(),
            });
        }
        attendees.extend(dedupe_attendees(extra, &[&booking.email]));

        let location = match &tour.zoom_link {
            Some(link) if !link.is_empty() => format!("Online (Zoom): {link}"),
            _ => tour.location.clone(),
        };

        self.calendar
            .insert_event(&EventRequest {
                summary: format!(
                    "{} — {} {} ({})",
                    tour.title, booking.first_name, booking.last_name, booking.attendees
                ),
                description: event_description(tour, booking, slot),
                location,
                start: slot.start_datetime(),
                end: slot.end_datetime(),
                attendees,
            })
            .await
    }
}

fn to_booking(request: CreateBooking) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        tour_id: request.tour_id,
        date: request.date,
        start_minutes: request.start_minutes,
        attendees: request.attendees,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
        organization: request.organization,
        role: request.role,
        interests: request.interests,
        accessibility: request.accessibility,
        special_requests: request.special_requests,
        marketing_consent: request.marketing_consent,
        lead_guide: request.lead_guide,
        notes: request.notes,
        created_at: Utc::now(),
    }
}

fn event_description(tour: &Tour, booking: &Booking, slot: Slot) -> String {
    let mut lines = vec![
        format!("Tour: {}", tour.title),
        format!("Date & Time: {} at {}", slot.date, slot.display_time()),
        format!("Group Size: {}", booking.attendees),
        format!(
            "Lead Guide: {}",
            booking.lead_guide.as_deref().unwrap_or("TBD")
        ),
        String::new(),
        "Contact".to_string(),
        format!("- Name: {} {}", booking.first_name, booking.last_name),
        format!("- Email: {}", booking.email),
    ];
    if let Some(phone) = &booking.phone {
        lines.push(format!("- Phone: {phone}"));
    }
    let mut notes = Vec::new();
    if let Some(requests) = &booking.special_requests {
        notes.push(format!("- Special Requests: {requests}"));
    }
    if let Some(accessibility) = &booking.accessibility {
        notes.push(format!("- Accessibility: {accessibility}"));
    }
    if !notes.is_empty() {
        lines.push(String::new());
        lines.push("Notes".to_string());
        lines.extend(notes);
    }
    lines.join("\n")
}
