//! Domain model for a public holiday annotation.

use super::calendar_day::CalendarDay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub name: String,
    pub day: CalendarDay,
}
