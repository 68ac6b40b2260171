//! # REST API Interface Layer
//!
//! HTTP endpoints of the PTO calendar. Handlers only translate between DTOs
//! and domain calls; all rules live in the domain layer.

pub mod mappers;
pub mod pto_apis;
