//! Guide model (student ambassadors leading tours)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::tour::Weekday;

/// Guide roster status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuideStatus {
    #[default]
    Active,
    Inactive,
}

/// One weekday of a guide's office hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub available: bool,
    /// "HH:MM" ranges; invalid entries are skipped during matching
    #[serde(default)]
    pub time_slots: Vec<OfficeHoursSlot>,
}

/// A {start, end} office-hours range as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeHoursSlot {
    pub start: String,
    pub end: String,
}

/// A staff member who can lead tour sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: GuideStatus,
    #[serde(default)]
    pub role: String,
    /// Weekly office hours keyed by lowercase weekday name
    #[serde(default)]
    pub office_hours: IndexMap<Weekday, DayHours>,
}
