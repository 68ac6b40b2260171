//! Domain models for the PTO calendar.

pub mod calendar_day;
pub mod holiday;
pub mod month;
pub mod year_state;

pub use calendar_day::CalendarDay;
pub use holiday::Holiday;
pub use month::Month;
pub use year_state::YearState;
