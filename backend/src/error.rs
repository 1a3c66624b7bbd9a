//! Error handling for the Weather Monitoring System
//!
//! Every failure in the core degrades to a skipped location, entry or cycle;
//! nothing here is fatal to the process.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Data completeness errors
    #[error("Missing field '{field}' for {location}")]
    MissingField { location: String, field: String },

    // External service errors
    #[error("Weather service unavailable")]
    WeatherServiceUnavailable,

    #[error("Weather API error: {0}")]
    WeatherApi(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
