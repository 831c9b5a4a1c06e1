//! Session and credential handling for the nursery stock tracker.
//!
//! The product data layer carries no identity concern; consumers pair its
//! flags with this crate's. A [`Session`] restores itself once at startup
//! from a [`CredentialStore`], then answers `is_authenticated`,
//! `is_loading` and `current_user` synchronously.
//!
//! The backend is stubbed the same way the store's is: any login
//! succeeds and yields [`FAKE_JWT_TOKEN`].

pub mod credentials;
pub mod error;
pub mod session;

pub use credentials::{CredentialStore, InMemoryCredentials, StoredCredentials};
pub use error::{Result, SessionError};
pub use session::{FAKE_JWT_TOKEN, Session, UserProfile};
