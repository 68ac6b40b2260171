//! Calendar domain logic for the PTO calendar.
//!
//! Builds the month structure of a year and parses ISO dates. Month indices
//! are 0-based everywhere in this module (0 = January), matching
//! [`CalendarDay::month`].

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::domain::errors::{PtoError, PtoResult};
use crate::domain::models::{CalendarDay, Month};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Calendar service that handles month generation and date parsing
#[derive(Clone, Debug, Default)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self
    }

    /// Whether every day of `year` can be represented.
    ///
    /// Dates are backed by `chrono::NaiveDate`, which covers roughly
    /// 262,000 years either side of year 0.
    pub fn supports_year(&self, year: i32) -> bool {
        NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
    }

    /// Build the 12 months of `year`, January first.
    ///
    /// For a year outside [`supports_year`](Self::supports_year) the months
    /// come back without days.
    pub fn build_months(&self, year: i32) -> Vec<Month> {
        debug!("Building months for {}", year);
        if !self.supports_year(year) {
            warn!("Year {} is outside the supported date range, months will be empty", year);
        }
        (0..12)
            .map(|month| Month {
                year,
                month,
                days: (1..=self.days_in_month(month, year))
                    .filter_map(|day| CalendarDay::new(year, month, day).ok())
                    .collect(),
            })
            .collect()
    }

    /// Parse a `YYYY-MM-DD` string into a 0-based month index and a day
    pub fn parse_iso_date(&self, iso: &str) -> PtoResult<(u32, u32)> {
        let (_, month, day) = Self::split_iso(iso)?;
        Ok((month - 1, day))
    }

    /// Parse a `YYYY-MM-DD` string into a validated calendar day
    pub fn parse_iso_day(&self, iso: &str) -> PtoResult<CalendarDay> {
        let (year, month, day) = Self::split_iso(iso)?;
        CalendarDay::new(year, month - 1, day)
    }

    /// Get the number of days in a month (0-based index) of a year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            1 => if self.is_leap_year(year) { 29 } else { 28 },
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the first day of a month (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Get the human-readable name for a month index
    pub fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES.get(month as usize).copied().unwrap_or("Invalid Month")
    }

    /// Split a strict `YYYY-MM-DD` string into year, 1-based month and day
    fn split_iso(iso: &str) -> PtoResult<(i32, u32, u32)> {
        let invalid = || PtoError::InvalidDateFormat(iso.to_string());

        let parts: Vec<&str> = iso.split('-').collect();
        let [year_str, month_str, day_str] = parts.as_slice() else {
            return Err(invalid());
        };

        let well_formed = year_str.len() == 4
            && month_str.len() == 2
            && day_str.len() == 2
            && parts
                .iter()
                .all(|part| part.chars().all(|c| c.is_ascii_digit()));
        if !well_formed {
            return Err(invalid());
        }

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        let day: u32 = day_str.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid());
        }

        Ok((year, month, day))
    }
}
