//! The session object: login, logout and restore over a credential store.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialStore, StoredCredentials};
use crate::error::Result;

/// Token issued by the stubbed backend for every successful login.
pub const FAKE_JWT_TOKEN: &str = "fake-jwt-token";

/// The signed-in user as consumers render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub role: String,
}

impl UserProfile {
    /// Builds the profile the stub backend returns for an email. The
    /// display name is the email local part.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            name,
            role: "USER".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<UserProfile>,
    token: Option<String>,
    loading: bool,
}

/// Authentication state next to, not inside, the product data layer.
///
/// The store knows nothing about identity; consumers pair its flags with
/// this object. Getters are synchronous so a consumer can read them in
/// the same breath as a store snapshot; only `restore` flips the loading
/// flag, mirroring the one startup read the UI performs.
///
/// Clones share the same state.
#[derive(Debug, Clone)]
pub struct Session<C> {
    state: Arc<RwLock<SessionState>>,
    credentials: C,
}

impl<C: CredentialStore> Session<C> {
    /// Creates a signed-out session over the given credential store.
    pub fn new(credentials: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            credentials,
        }
    }

    /// Returns true if a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().token.is_some()
    }

    /// Returns true while `restore` is reading the credential store.
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    /// Returns the signed-in user, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.read().unwrap().user.clone()
    }

    /// Returns the held token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.read().unwrap().token.clone()
    }

    /// Restores a previous session from the credential store.
    ///
    /// The startup read: `loading` is true while the store is consulted
    /// and false afterwards, success or not. With nothing saved the
    /// session simply stays signed out.
    #[tracing::instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<UserProfile>> {
        self.state.write().unwrap().loading = true;

        let loaded = self.credentials.load().await;

        let mut state = self.state.write().unwrap();
        state.loading = false;
        match loaded {
            Ok(Some(stored)) => {
                state.token = Some(stored.token);
                state.user = Some(stored.profile.clone());
                tracing::info!(email = %stored.profile.email, "session restored");
                Ok(Some(stored.profile))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed");
                Err(e)
            }
        }
    }

    /// Signs in. The stub backend accepts any credentials, so this always
    /// succeeds unless persisting them fails; on a persist failure the
    /// session stays signed out.
    #[tracing::instrument(skip(self, _password))]
    pub async fn login(&self, email: &str, _password: &str) -> Result<UserProfile> {
        let profile = UserProfile::from_email(email);
        let stored = StoredCredentials {
            token: FAKE_JWT_TOKEN.to_string(),
            profile: profile.clone(),
        };
        self.credentials.save(&stored).await?;

        let mut state = self.state.write().unwrap();
        state.token = Some(stored.token);
        state.user = Some(stored.profile);
        drop(state);

        tracing::info!(email, "session opened");
        Ok(profile)
    }

    /// Signs out: clears the in-memory state and the saved credentials.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.credentials.clear().await?;

        let mut state = self.state.write().unwrap();
        state.user = None;
        state.token = None;
        drop(state);

        tracing::info!("session closed");
        Ok(())
    }
}
