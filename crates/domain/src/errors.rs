//! Domain error types.

use thiserror::Error;

/// Errors raised by the core engines.
///
/// Visibility failures are reported as `NotFound` so callers cannot tell a
/// hidden resource from a missing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
