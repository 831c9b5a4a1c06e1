//! In-memory product store for the nursery stock tracker.
//!
//! This crate provides the single source of truth for the product
//! collection:
//! - [`ProductStore`] with async load, create, update and remove
//! - shared `loading` and `error` flags exposed through [`StoreSnapshot`]
//! - simulated latency and switchable failure injection
//! - [`SeedSource`] for swapping the catalog consumed by `load()`

pub mod config;
pub mod error;
pub mod event;
pub mod failure;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use common::ProductId;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use event::{Operation, StoreEvent};
pub use failure::{FailureInjector, FailureSwitch, NoFailure};
pub use seed::{FixtureSeed, JsonSeed, SeedError, SeedSource, starter_catalog};
pub use snapshot::StoreSnapshot;
pub use store::{ProductStore, StoreBuilder};
