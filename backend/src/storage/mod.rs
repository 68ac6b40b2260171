//! # Storage Module
//!
//! Handles all data persistence operations for the PTO calendar.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving per-year
//! state. The domain layer depends only on [`YearStateStorage`]; the JSON-file
//! backend in [`json`] is the medium shipped with the application.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving a year's allowance and taken days to disk
//! - **Data Retrieval**: Loading stored years back into memory
//! - **Corruption Handling**: Treating unreadable records as absent
//! - **Storage Abstraction**: Providing a consistent API regardless of backend

pub mod json;
pub mod traits;

pub use json::{JsonConnection, YearStateRepository};
pub use traits::{Connection, YearStateStorage};
