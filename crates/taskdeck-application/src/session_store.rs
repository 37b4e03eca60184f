//! Session ownership: login, logout, credential snapshots.

use std::sync::Arc;
use taskdeck_core::api::AuthApi;
use taskdeck_core::{ApiError, Credentials, Envelope};
use tokio::sync::RwLock;

/// Owns the authentication token and user identifier.
///
/// The pair lives behind one lock as a single `Option<Credentials>`, so it
/// is stored, read and cleared atomically: an outgoing request can never
/// observe a user id without its matching token. An explicitly owned
/// instance (not ambient global state) so tests construct isolated stores.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    credentials: RwLock<Option<Credentials>>,
}

impl SessionStore {
    /// Creates a store with no active session.
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            credentials: RwLock::new(None),
        }
    }

    /// Authenticates against the backend and stores the token/user-id pair
    /// as one atomic update.
    ///
    /// On failure the previous session, if any, is left untouched.
    pub async fn login(&self, username_or_email: &str, password: &str) -> Envelope<()> {
        match self.api.login(username_or_email, password).await {
            Ok(response) => {
                let mut credentials = self.credentials.write().await;
                *credentials = Some(Credentials::new(response.token, response.user_id));
                tracing::info!("[SessionStore] Login succeeded");
                Envelope::ok_empty("Login successful")
            }
            Err(error) => {
                tracing::warn!("[SessionStore] Login failed: {}", error);
                Envelope::failure(&error)
            }
        }
    }

    /// Validates a persisted token via the backend and restores the session
    /// from it.
    ///
    /// On failure the session stays cleared; it is never partially set.
    pub async fn restore(&self, token: &str) -> Envelope<()> {
        match self.api.current_user(token).await {
            Ok(response) => {
                let mut credentials = self.credentials.write().await;
                *credentials = Some(Credentials::new(response.token, response.user_id));
                tracing::info!("[SessionStore] Session restored");
                Envelope::ok_empty("Session restored")
            }
            Err(error) => {
                tracing::debug!("[SessionStore] Session restore failed: {}", error);
                Envelope::failure(&error)
            }
        }
    }

    /// Notifies the backend best-effort, then clears the session
    /// unconditionally. Idempotent: calling it without a session is a no-op.
    pub async fn logout(&self) {
        let snapshot = self.credentials.read().await.clone();
        if let Some(credentials) = snapshot {
            if let Err(error) = self.api.logout(&credentials).await {
                // Remote logout is best-effort; the local session is cleared
                // regardless.
                tracing::warn!("[SessionStore] Remote logout failed: {}", error);
            }
        }
        let mut credentials = self.credentials.write().await;
        *credentials = None;
        tracing::info!("[SessionStore] Session cleared");
    }

    /// True iff a token is present.
    pub async fn is_authenticated(&self) -> bool {
        self.credentials.read().await.is_some()
    }

    /// The current user id, if authenticated.
    pub async fn user_id(&self) -> Option<String> {
        self.credentials
            .read()
            .await
            .as_ref()
            .map(|c| c.user_id.clone())
    }

    /// One atomic snapshot of the token/user-id pair.
    pub async fn credentials(&self) -> Option<Credentials> {
        self.credentials.read().await.clone()
    }

    /// Snapshot for an outgoing request, or the synthetic
    /// not-authenticated failure when no session exists.
    pub(crate) async fn require_credentials(&self) -> Result<Credentials, ApiError> {
        self.credentials
            .read()
            .await
            .clone()
            .ok_or(ApiError::NotAuthenticated)
    }
}

#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;
