//! JSON-file storage backend: one record file per year in the data directory.

pub mod connection;
pub mod year_state_repository;
#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use year_state_repository::{storage_key, YearStateRepository};
