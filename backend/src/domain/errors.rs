//! Error types for the PTO year-state domain.

use thiserror::Error;

/// Errors that can occur in year-state operations.
#[derive(Error, Debug)]
pub enum PtoError {
    #[error("Invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("Invalid calendar date: year {year}, month index {month}, day {day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Persistence error: {0:#}")]
    Persistence(anyhow::Error),
}

/// Result type alias for year-state operations.
pub type PtoResult<T> = Result<T, PtoError>;
