//! Domain model for the persisted per-year PTO state.

use super::calendar_day::CalendarDay;

/// Allowance and taken days of a single year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearState {
    pub allowance: u32,
    pub taken: Vec<CalendarDay>,
}

impl YearState {
    /// Build a year state, collapsing repeated days into one entry
    pub fn new(allowance: u32, taken: Vec<CalendarDay>) -> Self {
        let mut unique: Vec<CalendarDay> = Vec::with_capacity(taken.len());
        for day in taken {
            if !unique.contains(&day) {
                unique.push(day);
            }
        }
        Self {
            allowance,
            taken: unique,
        }
    }

    /// A fresh year with the given allowance and nothing taken
    pub fn with_allowance(allowance: u32) -> Self {
        Self {
            allowance,
            taken: Vec::new(),
        }
    }

    /// Check that every taken day falls within `year`
    pub fn is_within_year(&self, year: i32) -> bool {
        self.taken.iter().all(|day| day.year() == year)
    }
}
