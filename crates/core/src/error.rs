//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic, input-driven failures belong here. Transport and
/// storage failures have their own error types in the crates that do I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank search input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An amount could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    /// Message suitable for showing to a shopper.
    pub fn user_message(&self) -> &str {
        match self {
            DomainError::Validation(msg)
            | DomainError::InvalidId(msg)
            | DomainError::InvalidAmount(msg) => msg,
        }
    }
}
