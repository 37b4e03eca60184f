//! Attachment collection ownership and mutation through the remote API.

use crate::session_store::SessionStore;
use std::sync::Arc;
use taskdeck_core::api::AttachmentApi;
use taskdeck_core::{ApiError, Attachment, Envelope, FileUpload};
use tokio::sync::RwLock;

/// Owns the in-memory attachment collection for the current user.
///
/// The collection holds whichever view was fetched last — all attachments of
/// the user, or the attachments of one task — and each fetch replaces it
/// wholesale; the two views are never merged. As with tasks, no failure path
/// mutates local state.
pub struct AttachmentStore {
    api: Arc<dyn AttachmentApi>,
    session: Arc<SessionStore>,
    attachments: RwLock<Vec<Attachment>>,
}

impl AttachmentStore {
    /// Creates an empty store.
    pub fn new(api: Arc<dyn AttachmentApi>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            attachments: RwLock::new(Vec::new()),
        }
    }

    /// Fetches all attachments of the user and replaces the collection.
    pub async fn list_for_user(&self) -> Envelope<Vec<Attachment>> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.list_for_user(&credentials).await {
            Ok(fetched) => {
                let mut attachments = self.attachments.write().await;
                *attachments = fetched.clone();
                Envelope::ok("Success", fetched)
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Fetches the attachments of one task and replaces the collection.
    pub async fn list_for_task(&self, task_id: &str) -> Envelope<Vec<Attachment>> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.list_for_task(&credentials, task_id).await {
            Ok(fetched) => {
                let mut attachments = self.attachments.write().await;
                *attachments = fetched.clone();
                Envelope::ok("Success", fetched)
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Uploads a standalone attachment and adds it to the collection.
    ///
    /// Size is not pre-validated: a server rejection (413) comes back as a
    /// classified envelope naming the limit.
    pub async fn upload(&self, file: &FileUpload) -> Envelope<Attachment> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.upload(&credentials, file).await {
            Ok(attachment) => {
                let mut attachments = self.attachments.write().await;
                attachments.insert(0, attachment.clone());
                tracing::info!("[AttachmentStore] Uploaded '{}'", attachment.filename);
                Envelope::ok("File uploaded successfully", attachment)
            }
            Err(error) => {
                tracing::warn!("[AttachmentStore] Upload failed: {}", error);
                Envelope::failure(&error)
            }
        }
    }

    /// Uploads an attachment linked to a task at creation time.
    pub async fn upload_for_task(&self, task_id: &str, file: &FileUpload) -> Envelope<Attachment> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.upload_for_task(&credentials, task_id, file).await {
            Ok(attachment) => {
                let mut attachments = self.attachments.write().await;
                attachments.insert(0, attachment.clone());
                Envelope::ok("File uploaded and attached successfully", attachment)
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Links an existing attachment to a task; the local entity's `task_id`
    /// changes on success only.
    pub async fn attach(&self, attachment_id: &str, task_id: &str) -> Envelope<()> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.attach(&credentials, attachment_id, task_id).await {
            Ok(()) => {
                let mut attachments = self.attachments.write().await;
                if let Some(attachment) = attachments.iter_mut().find(|a| a.id == attachment_id) {
                    attachment.task_id = Some(task_id.to_string());
                }
                Envelope::ok_empty("File attached successfully")
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Unlinks an attachment from its task.
    pub async fn detach(&self, attachment_id: &str) -> Envelope<()> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.detach(&credentials, attachment_id).await {
            Ok(()) => {
                let mut attachments = self.attachments.write().await;
                if let Some(attachment) = attachments.iter_mut().find(|a| a.id == attachment_id) {
                    attachment.task_id = None;
                }
                Envelope::ok_empty("File detached successfully")
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Downloads the raw content of an attachment. No local state changes.
    pub async fn download(&self, attachment_id: &str) -> Envelope<Vec<u8>> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.download(&credentials, attachment_id).await {
            Ok(bytes) => Envelope::ok("File downloaded successfully", bytes),
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Downloads an attachment and decodes it as UTF-8 text, for text-file
    /// previews. A payload that is not valid UTF-8 is a classified failure,
    /// not a panic.
    pub async fn download_as_text(&self, attachment_id: &str) -> Envelope<String> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.download(&credentials, attachment_id).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Envelope::ok("File content retrieved successfully", text),
                Err(_) => Envelope::failure(&ApiError::server(
                    500,
                    "Failed to get file content.",
                )),
            },
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Deletes an attachment and removes it from the collection on success.
    pub async fn delete(&self, attachment_id: &str) -> Envelope<()> {
        let credentials = match self.session.require_credentials().await {
            Ok(c) => c,
            Err(error) => return Envelope::failure(&error),
        };

        match self.api.delete(&credentials, attachment_id).await {
            Ok(()) => {
                let mut attachments = self.attachments.write().await;
                attachments.retain(|a| a.id != attachment_id);
                tracing::info!("[AttachmentStore] Deleted attachment {}", attachment_id);
                Envelope::ok_empty("Attachment deleted successfully")
            }
            Err(error) => Envelope::failure(&error),
        }
    }

    /// Snapshot of the local collection.
    pub async fn attachments(&self) -> Vec<Attachment> {
        self.attachments.read().await.clone()
    }

    /// Drops all local attachments. Called on logout.
    pub(crate) async fn clear(&self) {
        self.attachments.write().await.clear();
    }
}

#[cfg(test)]
#[path = "attachment_store_test.rs"]
mod tests;
