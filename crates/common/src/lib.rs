//! Shared types used across the nursery stock workspace.

pub mod types;

pub use types::ProductId;
