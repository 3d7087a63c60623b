//! Calendar invite integration
//!
//! Downstream side effect after a confirmed booking: create an event on
//! the staff calendar with the visitor and matched guides as attendees.
//! The engine never depends on this; failures degrade to "booking saved,
//! no invite".

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;

use crate::config::CalendarConfig;
use crate::error::{AppError, AppResult};

/// An event attendee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub email: String,
    pub display_name: Option<String>,
}

/// Event to create on the staff calendar
#[derive(Debug, Clone)]
pub struct EventRequest {
    pub summary: String,
    pub description: String,
    pub location: String,
    /// Session bounds in the tour's local frame; the IANA timezone is
    /// sent alongside rather than baked into an offset
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub attendees: Vec<Attendee>,
}

/// Opaque reference to a created event
#[derive(Debug, Clone, Deserialize)]
pub struct EventRef {
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
}

/// Transport boundary for event creation
#[async_trait]
pub trait CalendarClient: Send + Sync {
    async fn insert_event(&self, event: &EventRequest) -> AppResult<EventRef>;
}

/// Google Calendar REST client
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    config: CalendarConfig,
    access_token: String,
}

impl GoogleCalendarClient {
    pub fn new(config: CalendarConfig, access_token: String) -> Self {
        Self { http: reqwest::Client::new(), config, access_token }
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events?sendUpdates=all",
            self.config.api_base, self.config.calendar_id
        )
    }
}

#[async_trait]
impl CalendarClient for GoogleCalendarClient {
    async fn insert_event(&self, event: &EventRequest) -> AppResult<EventRef> {
        let attendees: Vec<_> = event
            .attendees
            .iter()
            .map(|a| {
                json!({
                    "email": a.email,
                    "displayName": a.display_name,
                })
            })
            .collect();
        let body = json!({
            "summary": event.summary,
            "description": event.description,
            "location": event.location,
            "start": {
                "dateTime": event.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "timeZone": self.config.timezone,
            },
            "end": {
                "dateTime": event.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "timeZone": self.config.timezone,
            },
            "attendees": attendees,
            "guestsCanInviteOthers": false,
            "guestsCanModify": false,
            "guestsCanSeeOtherGuests": true,
            "reminders": { "useDefault": true },
        });

        let response = self
            .http
            .post(self.events_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Calendar(format!("insert failed: {status} {text}")));
        }
        Ok(response.json::<EventRef>().await?)
    }
}
