//! Product entity model for the nursery stock tracker.
//!
//! This crate provides the record types and their field invariants:
//! - `Product` record with store-assigned identity and timestamps
//! - `ProductDraft` and `ProductPatch` create/update payloads
//! - `Category` and `Gender` code/label enums with identity fallback
//!   for unknown codes
//! - the low-stock predicate (strictly below the reorder threshold)

pub mod category;
pub mod error;
pub mod gender;
pub mod options;
pub mod product;

pub use category::Category;
pub use error::DomainError;
pub use gender::Gender;
pub use options::SelectOption;
pub use product::{Product, ProductDraft, ProductPatch};
