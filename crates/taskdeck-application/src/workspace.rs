//! Wiring of the stores, session and selection controller.

use crate::attachment_store::AttachmentStore;
use crate::session_store::SessionStore;
use crate::task_store::TaskStore;
use std::sync::Arc;
use taskdeck_api::HttpApiClient;
use taskdeck_core::api::{AttachmentApi, AuthApi, TaskApi};
use taskdeck_core::{Envelope, SelectionController};

/// The assembled synchronization layer handed to the UI.
///
/// Owns one instance of each store plus the shared selection controller.
/// Login and logout are exposed here because logout has cross-component
/// effects: the session is cleared, both collections are dropped, and the
/// selection controller returns to its initial state.
pub struct Workspace {
    session: Arc<SessionStore>,
    tasks: Arc<TaskStore>,
    attachments: Arc<AttachmentStore>,
    selection: Arc<SelectionController>,
}

impl Workspace {
    /// Assembles a workspace over explicit API implementations. Tests pass
    /// mocks here; production code uses [`Workspace::from_env`].
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        task_api: Arc<dyn TaskApi>,
        attachment_api: Arc<dyn AttachmentApi>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(auth_api));
        let selection = Arc::new(SelectionController::new());
        let tasks = Arc::new(TaskStore::new(
            task_api,
            session.clone(),
            selection.clone(),
        ));
        let attachments = Arc::new(AttachmentStore::new(attachment_api, session.clone()));

        Self {
            session,
            tasks,
            attachments,
            selection,
        }
    }

    /// Assembles a workspace over the HTTP client configured from
    /// environment variables.
    pub fn from_env() -> Self {
        let client = Arc::new(HttpApiClient::from_env());
        Self::new(client.clone(), client.clone(), client)
    }

    /// Authenticates and stores the session.
    pub async fn login(&self, username_or_email: &str, password: &str) -> Envelope<()> {
        self.session.login(username_or_email, password).await
    }

    /// Restores a session from a persisted token.
    pub async fn restore_session(&self, token: &str) -> Envelope<()> {
        self.session.restore(token).await
    }

    /// Logs out and resets every component: session cleared, collections
    /// dropped, selection back to its initial state. Idempotent.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.tasks.clear().await;
        self.attachments.clear().await;
        self.selection.reset();
    }

    /// The session store.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The task store.
    pub fn tasks(&self) -> &Arc<TaskStore> {
        &self.tasks
    }

    /// The attachment store.
    pub fn attachments(&self) -> &Arc<AttachmentStore> {
        &self.attachments
    }

    /// The shared selection controller.
    pub fn selection(&self) -> &Arc<SelectionController> {
        &self.selection
    }
}

#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;
