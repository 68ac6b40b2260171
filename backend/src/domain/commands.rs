//! Domain-level command and outcome types
//! These types are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping
//! them to the DTOs defined in the `shared` crate.

/// Ticket for a holiday fetch issued by the engine.
///
/// A response is applied only if its ticket is still the current one; every
/// year change issues a new ticket and invalidates the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayRequest {
    pub year: i32,
    pub(crate) epoch: u64,
}

impl HolidayRequest {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Loading state of the holiday annotations for the active year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayStatus {
    Pending,
    Loaded,
    Failed,
}

/// Why a toggle request left the taken set untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Weekend,
    NoRemaining,
    OutsideActiveYear,
}

/// Result of toggling a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    Ignored(IgnoreReason),
}
