//! Error types for the tour booking engine

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A time-of-day string in a tour configuration is not "HH:MM" with
    /// hours in 0..=23 and minutes in 0..=59. Surfaced to the tour-editing
    /// UI as a validation error, never silently coerced.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// A window whose start is not strictly before its end. At resolution
    /// time such a window contributes zero candidates and the computation
    /// continues with the remaining windows.
    #[error("Invalid window: start {start} is not before end {end}")]
    InvalidWindow { start: String, end: String },

    /// Missing or non-positive duration/frequency. The engine treats this
    /// as "no availability" rather than failing the whole computation.
    #[error("Configuration incomplete: {0}")]
    ConfigurationIncomplete(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested slot is no longer offerable (filled up or filtered out
    /// between display and submission).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
