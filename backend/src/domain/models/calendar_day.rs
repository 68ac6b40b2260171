//! Domain model for a single calendar day.

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

use crate::domain::errors::{PtoError, PtoResult};

/// A calendar date addressed by year, 0-based month index and 1-based day.
///
/// Two days are equal when they fall on the same date, regardless of where
/// they came from (storage, a holiday payload, a user click).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDay {
    date: NaiveDate,
}

impl CalendarDay {
    /// Create a day from a year, a 0-based month index and a 1-based day
    pub fn new(year: i32, month: u32, day: u32) -> PtoResult<Self> {
        let date = month
            .checked_add(1)
            .and_then(|month1| NaiveDate::from_ymd_opt(year, month1, day))
            .ok_or(PtoError::InvalidDate { year, month, day })?;
        Ok(Self { date })
    }

    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month index (0 = January, 11 = December)
    pub fn month(&self) -> u32 {
        self.date.month0()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Format as `YYYY-MM-DD`
    pub fn to_iso_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}
