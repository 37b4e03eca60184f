//! Task collection ownership and mutation through the remote API.

use crate::session_store::SessionStore;
use std::sync::Arc;
use taskdeck_core::api::TaskApi;
use taskdeck_core::{ApiError, Envelope, SelectionController, Task};
use tokio::sync::RwLock;

/// Owns the in-memory task collection for the current user.
///
/// Every mutation goes through the remote API first; the local collection
/// changes only after the server confirms, so a failed request never leaves
/// a partial update behind. Order is the server's order from the last full
/// fetch, with newly created tasks prepended.
pub struct TaskStore {
    api: Arc<dyn TaskApi>,
    session: Arc<SessionStore>,
    selection: Arc<SelectionController>,
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new(
        api: Arc<dyn TaskApi>,
        session: Arc<SessionStore>,
        selection: Arc<SelectionController>,
    ) -> Self {
        Self {
            api,
            session,
            selection,
            tasks: RwLock::new(Vec::new()),
        }
    }

    /// Fetches all tasks and replaces the local collection wholesale.
    ///
    /// On failure the collection is left unchanged.
    pub async fn list(&self) -> Envelope<Vec<Task>> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.list(&credentials).await {
            Ok(fetched) => {
                let mut tasks = self.tasks.write().await;
                *tasks = fetched.clone();
                tracing::debug!("[TaskStore] Fetched {} tasks", fetched.len());
                Envelope::ok("Success", fetched)
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Creates a task and prepends the server-returned entity.
    ///
    /// Rejects locally, without issuing a request, when the title trims to
    /// empty.
    pub async fn create(&self, title: &str, description: &str) -> Envelope<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Envelope::failure(&ApiError::validation("Task title is required"));
        }

        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.create(&credentials, title, description.trim()).await {
            Ok(task) => {
                let mut tasks = self.tasks.write().await;
                tasks.insert(0, task.clone());
                tracing::info!("[TaskStore] Created task {}", task.id);
                Envelope::ok("Task created successfully", task)
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Sets a task's completion flag.
    ///
    /// The local flag changes only after the server confirms; on failure the
    /// task keeps its prior value.
    pub async fn set_completed(&self, task_id: &str, completed: bool) -> Envelope<()> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.set_completed(&credentials, task_id, completed).await {
            Ok(()) => {
                let mut tasks = self.tasks.write().await;
                if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
                    task.is_completed = completed;
                    task.updated_at = chrono::Utc::now();
                }
                Envelope::ok_empty("Task updated successfully")
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Deletes a task.
    ///
    /// On success the task is removed locally and any selection or
    /// attachment filter pointing at it is cleared.
    pub async fn delete(&self, task_id: &str) -> Envelope<()> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.delete(&credentials, task_id).await {
            Ok(()) => {
                let mut tasks = self.tasks.write().await;
                tasks.retain(|t| t.id != task_id);
                drop(tasks);
                self.selection.cascade_task_deleted(task_id);
                tracing::info!("[TaskStore] Deleted task {}", task_id);
                Envelope::ok_empty("Task deleted successfully")
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Snapshot of the local collection.
    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Drops all local tasks. Called on logout.
    pub(crate) async fn clear(&self) {
        self.tasks.write().await.clear();
    }
}

#[cfg(test)]
#[path = "task_store_test.rs"]
mod tests;
