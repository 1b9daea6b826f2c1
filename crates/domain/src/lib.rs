//! Domain layer for the Up For Something backend.
//!
//! This crate contains:
//! - Domain models and request/response DTOs
//! - The core engines: timeline materialization, visibility predicates,
//!   the participation state machine and the summary status aggregator
//! - Domain error types
//!
//! Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod services;

pub use errors::{DomainError, DomainResult};
