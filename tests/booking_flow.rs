//! End-to-end booking flow over the in-memory stores

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use mockall::mock;
use mockall::predicate::function;

use tourbook::config::BookingConfig;
use tourbook::error::{AppError, AppResult};
use tourbook::models::booking::CreateBooking;
use tourbook::models::guide::{DayHours, Guide, GuideStatus, OfficeHoursSlot};
use tourbook::models::tour::{CreateTour, Weekday};
use tourbook::repository::memory::{MemoryBookingStore, MemoryGuideStore, MemoryTourStore};
use tourbook::repository::Repository;
use tourbook::services::calendar::{CalendarClient, EventRef, EventRequest};
use tourbook::services::Services;

mock! {
    Calendar {}

    #[async_trait::async_trait]
    impl CalendarClient for Calendar {
        async fn insert_event(&self, event: &EventRequest) -> AppResult<EventRef>;
    }
}

fn monday() -> NaiveDate {
    // 2026-08-31 is a Monday
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

fn early_now() -> NaiveDateTime {
    monday().and_hms_opt(0, 0, 0).unwrap()
}

fn campus_tour() -> CreateTour {
    serde_json::from_value(serde_json::json!({
        "title": "Engineering Campus Tour",
        "description": "Walking tour of the engineering quad",
        "maxAttendees": 15,
        "location": "Main gate",
        "published": true,
        "schedule": {
            "duration": 60,
            "durationUnit": "minutes",
            "frequency": 60,
            "frequencyUnit": "minutes",
            "registrationLimit": 2,
            "minNotice": 0,
            "maxNotice": 4,
            "maxNoticeUnit": "weeks",
            "weeklyHours": {
                "monday": [ { "start": "09:00", "end": "12:00" } ]
            }
        }
    }))
    .unwrap()
}

fn guide(name: &str, email: &str, start: &str, end: &str) -> Guide {
    let mut office_hours = IndexMap::new();
    office_hours.insert(
        Weekday::Monday,
        DayHours {
            available: true,
            time_slots: vec![OfficeHoursSlot { start: start.into(), end: end.into() }],
        },
    );
    Guide {
        id: name.to_lowercase(),
        name: name.to_string(),
        email: email.to_string(),
        status: GuideStatus::Active,
        role: "ambassador".to_string(),
        office_hours,
    }
}

async fn services_with(calendar: MockCalendar, guides: Vec<Guide>) -> Services {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let guide_store = Arc::new(MemoryGuideStore::default());
    guide_store.seed(guides).await;
    let repository = Repository::new(
        Arc::new(MemoryTourStore::default()),
        Arc::new(MemoryBookingStore::default()),
        guide_store,
    );
    Services::new(
        repository,
        Arc::new(calendar),
        BookingConfig {
            distribution_email: Some("tours@campus.edu".to_string()),
            distribution_name: Some("Campus Tours".to_string()),
        },
    )
}

fn booking_request(tour_id: &str, start_minutes: u16) -> CreateBooking {
    serde_json::from_value(serde_json::json!({
        "tourId": tour_id,
        "date": "2026-08-31",
        "startMinutes": start_minutes,
        "attendees": 4,
        "firstName": "Sam",
        "lastName": "Rivera",
        "email": "sam.rivera@example.com",
        "organization": "Hillside High",
        "role": "prospective-student"
    }))
    .unwrap()
}

#[tokio::test]
async fn available_slots_follow_schedule_and_capacity() {
    let mut calendar = MockCalendar::new();
    calendar
        .expect_insert_event()
        .returning(|_| Ok(EventRef { id: "evt-1".into(), html_link: None }));
    let services = services_with(calendar, Vec::new()).await;

    let tour = services.tours.create(campus_tour()).await.unwrap();
    let slots = services
        .bookings
        .available_slots(&tour.id, monday(), early_now())
        .await
        .unwrap();
    let labels: Vec<String> = slots.iter().map(|s| s.display_time()).collect();
    assert_eq!(labels, vec!["9:00 AM", "10:00 AM", "11:00 AM"]);

    // registration limit 2: the slot disappears after the second booking
    services.bookings.submit(booking_request(&tour.id, 600), early_now()).await.unwrap();
    services.bookings.submit(booking_request(&tour.id, 600), early_now()).await.unwrap();
    let slots = services
        .bookings
        .available_slots(&tour.id, monday(), early_now())
        .await
        .unwrap();
    assert!(!slots.iter().any(|s| s.start_minutes == 600));
    assert!(slots.iter().any(|s| s.start_minutes == 540));
}

#[tokio::test]
async fn full_slot_is_rejected_with_conflict() {
    let mut calendar = MockCalendar::new();
    calendar
        .expect_insert_event()
        .returning(|_| Ok(EventRef { id: "evt-1".into(), html_link: None }));
    let services = services_with(calendar, Vec::new()).await;

    let tour = services.tours.create(campus_tour()).await.unwrap();
    services.bookings.submit(booking_request(&tour.id, 660), early_now()).await.unwrap();
    services.bookings.submit(booking_request(&tour.id, 660), early_now()).await.unwrap();

    let result = services.bookings.submit(booking_request(&tour.id, 660), early_now()).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn invite_includes_matched_guides_and_distribution_list() {
    let mut calendar = MockCalendar::new();
    calendar
        .expect_insert_event()
        .with(function(|event: &EventRequest| {
            let emails: Vec<&str> = event.attendees.iter().map(|a| a.email.as_str()).collect();
            emails
                == vec![
                    "sam.rivera@example.com",
                    "jordan@campus.edu",
                    "tours@campus.edu",
                ]
                && event.summary.starts_with("Engineering Campus Tour")
        }))
        .times(1)
        .returning(|_| Ok(EventRef { id: "evt-9".into(), html_link: Some("link".into()) }));

    // Jordan's office hours overlap 10:00-11:00; Casey is off Mondays
    let jordan = guide("Jordan", "jordan@campus.edu", "09:30", "10:30");
    let mut casey = guide("Casey", "casey@campus.edu", "09:00", "17:00");
    casey.office_hours[&Weekday::Monday].available = false;
    let services = services_with(calendar, vec![jordan, casey]).await;

    let tour = services.tours.create(campus_tour()).await.unwrap();
    let confirmation = services
        .bookings
        .submit(booking_request(&tour.id, 600), early_now())
        .await
        .unwrap();
    assert_eq!(confirmation.calendar_event.unwrap().id, "evt-9");
}

#[tokio::test]
async fn calendar_failure_does_not_lose_the_booking() {
    let mut calendar = MockCalendar::new();
    calendar
        .expect_insert_event()
        .returning(|_| Err(AppError::Calendar("upstream 503".to_string())));
    let services = services_with(calendar, Vec::new()).await;

    let tour = services.tours.create(campus_tour()).await.unwrap();
    let confirmation = services
        .bookings
        .submit(booking_request(&tour.id, 540), early_now())
        .await
        .unwrap();
    assert!(confirmation.calendar_event.is_none());

    // the slot's capacity was still consumed
    let slots = services
        .bookings
        .available_slots(&tour.id, monday(), early_now())
        .await
        .unwrap();
    assert_eq!(
        slots.iter().filter(|s| s.start_minutes == 540).count(),
        1,
        "one of two capacity units remains"
    );
}

#[tokio::test]
async fn blackout_override_blocks_a_weekly_day() {
    let mut calendar = MockCalendar::new();
    calendar.expect_insert_event().never();
    let services = services_with(calendar, Vec::new()).await;

    let mut input = campus_tour();
    input.schedule.date_specific_hours = serde_json::from_value(serde_json::json!([
        { "date": "2026-08-31", "slots": [], "unavailable": true }
    ]))
    .unwrap();
    let tour = services.tours.create(input).await.unwrap();

    let slots = services
        .bookings
        .available_slots(&tour.id, monday(), early_now())
        .await
        .unwrap();
    assert!(slots.is_empty());

    let result = services.bookings.submit(booking_request(&tour.id, 540), early_now()).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn unpublished_tour_is_not_bookable() {
    let mut calendar = MockCalendar::new();
    calendar.expect_insert_event().never();
    let services = services_with(calendar, Vec::new()).await;

    let mut input = campus_tour();
    input.published = false;
    let tour = services.tours.create(input).await.unwrap();

    let result = services.bookings.submit(booking_request(&tour.id, 540), early_now()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
