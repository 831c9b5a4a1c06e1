//! Session error types.

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The credential store could not be read or written.
    #[error("credential storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for session results.
pub type Result<T> = std::result::Result<T, SessionError>;
