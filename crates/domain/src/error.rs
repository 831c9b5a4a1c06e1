//! Domain error types.

use thiserror::Error;

/// Errors raised when a product payload violates a field invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Product name is empty or whitespace-only.
    #[error("product name must not be empty")]
    EmptyName,
}
