//! # IO Module
//!
//! Interface layer between clients and the domain logic. Translates HTTP
//! requests into [`PtoService`](crate::domain::PtoService) calls and domain
//! results into the DTOs of the `shared` crate.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST endpoints under `/api/pto`
//! - **Error Translation**: Invalid dates become 400, persistence failures 500
//! - **Serialization**: JSON request/response handling via serde

pub mod rest;
