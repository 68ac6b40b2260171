//! Domain model for a generated calendar month.

use super::calendar_day::CalendarDay;

/// All days of one month of one year, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    /// Month index (0 = January, 11 = December)
    pub month: u32,
    pub days: Vec<CalendarDay>,
}
