use thiserror::Error;

use common::ProductId;
use domain::DomainError;

use crate::seed::SeedError;

/// Errors that can occur when operating on the product store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The simulated backend reported a failure for this operation.
    /// The message is the fixed user-facing text for the operation.
    #[error("{0}")]
    Backend(String),

    /// The seed source could not supply the catalog during a load.
    #[error("seed source error: {0}")]
    Seed(#[from] SeedError),

    /// No product with the given id exists in the collection.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The payload violated a field invariant.
    #[error("invalid product: {0}")]
    Invalid(#[from] DomainError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
