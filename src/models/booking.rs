//! Booking models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A confirmed tour booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub tour_id: String,
    /// Session date
    pub date: NaiveDate,
    /// Session start, minutes since midnight
    pub start_minutes: u16,
    /// Group size
    pub attendees: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// School or organization
    pub organization: Option<String>,
    /// Visitor role (prospective student, parent, counselor, ...)
    pub role: Option<String>,
    /// Majors or programs of interest
    pub interests: Vec<String>,
    pub accessibility: Option<String>,
    pub special_requests: Option<String>,
    pub marketing_consent: bool,
    /// Assigned lead guide, if any
    pub lead_guide: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Capacity snapshot entry for this booking
    pub fn to_record(&self) -> BookingRecord {
        BookingRecord { date: self.date, start_minutes: self.start_minutes, count: 1 }
    }
}

/// Booking submission request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub tour_id: String,
    /// Session date (YYYY-MM-DD is handled at the store boundary)
    pub date: NaiveDate,
    /// Requested slot start, minutes since midnight
    pub start_minutes: u16,
    #[validate(range(min = 1, message = "Group size must be at least 1"))]
    pub attendees: u32,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub accessibility: Option<String>,
    pub special_requests: Option<String>,
    #[serde(default)]
    pub marketing_consent: bool,
    pub lead_guide: Option<String>,
    pub notes: Option<String>,
}

/// One slot instance's consumed capacity, as supplied by the booking
/// store. Only used to decrement remaining capacity; not owned by the
/// availability engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub date: NaiveDate,
    pub start_minutes: u16,
    /// Confirmed bookings at this start time
    pub count: u32,
}
