//! # Domain Module
//!
//! Business rules of the PTO calendar, independent of how state is stored
//! and how it is presented.
//!
//! ## Key Responsibilities
//!
//! - **Calendar**: Building the twelve months of a year and parsing ISO dates
//! - **Year State**: Allowance, taken days and remaining balance of the active year
//! - **Navigation**: Moving between years within the configured range
//! - **Holidays**: Annotating the active year with public holidays
//!
//! All state changes go through [`YearStateEngine`]; [`PtoService`] is the
//! shareable handle used by the IO layer.

pub mod allowance;
pub mod calendar;
pub mod commands;
pub mod errors;
pub mod models;
pub mod pto_service;
pub mod year_state_engine;
#[cfg(test)]
mod year_state_properties;

pub use allowance::parse_allowance_input;
pub use calendar::CalendarService;
pub use commands::{HolidayRequest, HolidayStatus, IgnoreReason, ToggleOutcome};
pub use errors::{PtoError, PtoResult};
pub use pto_service::{HolidayLookup, PtoService, YearSnapshot};
pub use year_state_engine::{EngineSettings, EngineState, YearStateEngine};
