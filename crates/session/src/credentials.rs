//! Credential persistence trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::session::UserProfile;

/// Token and profile as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    pub token: String,
    pub profile: UserProfile,
}

/// Where a session keeps credentials between runs. Stands in for the
/// browser storage the UI would use.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads previously saved credentials, if any.
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Saves credentials, replacing any previous ones.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Removes saved credentials.
    async fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default)]
struct InMemoryCredentialState {
    stored: Option<StoredCredentials>,
    fail_on_load: bool,
    fail_on_save: bool,
}

/// In-memory credential store for testing and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    state: Arc<RwLock<InMemoryCredentialState>>,
}

impl InMemoryCredentials {
    /// Creates a new empty credential store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding credentials, as if a previous run
    /// had saved them.
    pub fn with_saved(credentials: StoredCredentials) -> Self {
        let store = Self::new();
        store.state.write().unwrap().stored = Some(credentials);
        store
    }

    /// Configures the store to fail on load calls.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.state.write().unwrap().fail_on_load = fail;
    }

    /// Configures the store to fail on save calls.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.state.write().unwrap().fail_on_save = fail;
    }

    /// Returns true if credentials are currently saved.
    pub fn has_saved(&self) -> bool {
        self.state.read().unwrap().stored.is_some()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        let state = self.state.read().unwrap();
        if state.fail_on_load {
            return Err(SessionError::Storage(
                "credential storage unavailable".to_string(),
            ));
        }
        Ok(state.stored.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_save {
            return Err(SessionError::Storage(
                "credential storage unavailable".to_string(),
            ));
        }
        state.stored = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.state.write().unwrap().stored = None;
        Ok(())
    }
}
