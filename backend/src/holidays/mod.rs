//! # Holidays Module
//!
//! Public holiday data for the active year comes from an external provider.
//! The provider is only ever asked for one year at a time, and any failure
//! is reported as a [`HolidayFetchError`] which the domain treats as
//! "no holidays for this year".

pub mod nager;
#[cfg(test)]
pub mod test_utils;

use async_trait::async_trait;
use thiserror::Error;

pub use nager::NagerHolidayProvider;

/// A holiday as reported by a provider, before it is placed in the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicHoliday {
    pub name: String,
    /// Date in `YYYY-MM-DD` form
    pub date: String,
}

impl PublicHoliday {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }
}

/// Errors that can occur while fetching holidays
#[derive(Error, Debug)]
pub enum HolidayFetchError {
    #[error("Holiday request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Holiday service responded with status {0}")]
    Status(u16),

    #[error("Malformed holiday payload: {0}")]
    MalformedPayload(String),
}

/// Source of public holidays for a year
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    /// Fetch all public holidays of `year`
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<PublicHoliday>, HolidayFetchError>;
}
