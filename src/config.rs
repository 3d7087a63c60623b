//! Configuration management
//!
//! Settings for the external collaborators (calendar integration,
//! booking distribution list). Engine inputs are data supplied per call,
//! not configuration.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    /// Calendar API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Target calendar
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// IANA timezone the tour schedule is authored in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_api_base() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            calendar_id: default_calendar_id(),
            timezone: default_timezone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BookingConfig {
    /// Distribution address always invited to confirmed sessions
    pub distribution_email: Option<String>,
    pub distribution_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml` (optional) layered
    /// with `TOURBOOK_*` environment variables
    pub fn load() -> AppResult<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("TOURBOOK").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
