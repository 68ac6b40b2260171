use serde::{Deserialize, Serialize};
use std::fmt;

/// A single day cell in a month view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtoDay {
    /// Day of month (1-31)
    pub day: u32,
    /// Date in `YYYY-MM-DD` form
    pub iso_date: String,
    pub is_weekend: bool,
    /// Whether the day is marked as taken PTO
    pub is_taken: bool,
    /// Marker token if the day is a public holiday
    pub holiday_marker: Option<String>,
}

/// Represents a calendar month of the active year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtoMonth {
    /// Month index (0 = January, 11 = December)
    pub month: u32,
    pub year: i32,
    /// Human-readable month name
    pub name: String,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
    pub days: Vec<PtoDay>,
}

/// A public holiday of the active year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub name: String,
    /// Date in `YYYY-MM-DD` form
    pub date: String,
}

/// Loading state of the holiday annotations for the active year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolidayStatus {
    /// Fetch requested, no response applied yet
    Pending,
    /// Holidays fetched and applied
    Loaded,
    /// Fetch failed, the year is shown without holidays
    Failed,
}

/// Snapshot of the active year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearViewResponse {
    pub year: i32,
    pub allowance: u32,
    /// Allowance minus number of taken days (negative if over-allocated)
    pub remaining: i64,
    /// Taken days in `YYYY-MM-DD` form, in the order they were taken
    pub taken: Vec<String>,
    pub months: Vec<PtoMonth>,
    pub holidays: Vec<HolidayEntry>,
    pub holiday_status: HolidayStatus,
    pub can_navigate_previous: bool,
    pub can_navigate_next: bool,
}

/// Request to change the allowance of the active year.
///
/// The value is kept as raw JSON so empty, null or non-numeric input can
/// fall back to the default allowance instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAllowanceRequest {
    #[serde(default)]
    pub allowance: serde_json::Value,
}

/// Request to toggle a day as taken/not taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleDayRequest {
    /// Date in `YYYY-MM-DD` form
    pub date: String,
}

/// What a toggle request did to the taken set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleDayResult {
    Added,
    Removed,
    IgnoredWeekend,
    IgnoredNoRemaining,
    IgnoredOutsideYear,
}

impl fmt::Display for ToggleDayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ToggleDayResult::Added => "added",
            ToggleDayResult::Removed => "removed",
            ToggleDayResult::IgnoredWeekend => "ignored (weekend)",
            ToggleDayResult::IgnoredNoRemaining => "ignored (no days remaining)",
            ToggleDayResult::IgnoredOutsideYear => "ignored (outside active year)",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleDayResponse {
    pub result: ToggleDayResult,
    pub year_view: YearViewResponse,
}

/// Query parameters for the holiday marker lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayMarkerQuery {
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayMarkerResponse {
    pub date: String,
    pub marker: Option<String>,
    pub holiday_name: Option<String>,
}

/// Error body returned by the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
