//! Mappers between domain types and the DTOs of the `shared` crate.

pub mod holiday_mapper;
pub mod year_view_mapper;
