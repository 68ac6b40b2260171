//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{CalendarDay, YearState};

/// Trait defining the interface for per-year PTO state storage
///
/// Each year is stored as an independent record. Implementations must treat
/// unreadable or invalid records as absent: `load_year_state` returns
/// `Ok(None)` for them, and only reports `Err` when the medium itself fails.
#[async_trait]
pub trait YearStateStorage: Send + Sync {
    /// Check whether a record exists for the year
    async fn has_year_state(&self, year: i32) -> Result<bool>;

    /// Load the record for the year, or None if it is absent or corrupt
    async fn load_year_state(&self, year: i32) -> Result<Option<YearState>>;

    /// Overwrite the record for the year
    async fn save_year_state(&self, year: i32, allowance: u32, taken: &[CalendarDay]) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories, so the domain layer can work
/// with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of YearStateStorage this connection creates
    type YearStateRepository: YearStateStorage + 'static;

    /// Create a new year state repository for this connection
    fn create_year_state_repository(&self) -> Self::YearStateRepository;
}
