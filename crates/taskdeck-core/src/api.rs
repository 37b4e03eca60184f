//! Remote-API traits.
//!
//! These traits decouple the stores from the HTTP transport: the
//! `taskdeck-api` crate implements them against the REST backend, and tests
//! implement them with in-memory mocks. All methods except login take the
//! caller's [`Credentials`] snapshot; the implementation attaches the bearer
//! token and user-identity header to every request.

use crate::attachment::{Attachment, FileUpload};
use crate::error::Result;
use crate::session::Credentials;
use crate::task::Task;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Response body of a successful login or session-restore call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Identifier of the authenticated user.
    pub user_id: String,
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token/user-id pair.
    async fn login(&self, username_or_email: &str, password: &str) -> Result<LoginResponse>;

    /// Validates a previously persisted token and returns the session it
    /// belongs to.
    async fn current_user(&self, token: &str) -> Result<LoginResponse>;

    /// Invalidates the session server-side. Callers treat this as
    /// best-effort; a failure never blocks the local logout.
    async fn logout(&self, credentials: &Credentials) -> Result<()>;
}

/// Task CRUD endpoints.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetches all tasks of the user.
    async fn list(&self, credentials: &Credentials) -> Result<Vec<Task>>;

    /// Creates a task and returns the server-assigned entity.
    async fn create(
        &self,
        credentials: &Credentials,
        title: &str,
        description: &str,
    ) -> Result<Task>;

    /// Sets the completion flag of a task.
    async fn set_completed(
        &self,
        credentials: &Credentials,
        task_id: &str,
        completed: bool,
    ) -> Result<()>;

    /// Deletes a task.
    async fn delete(&self, credentials: &Credentials, task_id: &str) -> Result<()>;
}

/// Attachment endpoints.
#[async_trait]
pub trait AttachmentApi: Send + Sync {
    /// Fetches all attachments of the user.
    async fn list_for_user(&self, credentials: &Credentials) -> Result<Vec<Attachment>>;

    /// Fetches the attachments linked to one task.
    async fn list_for_task(
        &self,
        credentials: &Credentials,
        task_id: &str,
    ) -> Result<Vec<Attachment>>;

    /// Uploads a standalone attachment.
    async fn upload(&self, credentials: &Credentials, file: &FileUpload) -> Result<Attachment>;

    /// Uploads an attachment linked to a task at creation time.
    async fn upload_for_task(
        &self,
        credentials: &Credentials,
        task_id: &str,
        file: &FileUpload,
    ) -> Result<Attachment>;

    /// Links an existing attachment to a task.
    async fn attach(
        &self,
        credentials: &Credentials,
        attachment_id: &str,
        task_id: &str,
    ) -> Result<()>;

    /// Unlinks an attachment from its task.
    async fn detach(&self, credentials: &Credentials, attachment_id: &str) -> Result<()>;

    /// Downloads the raw content of an attachment.
    async fn download(&self, credentials: &Credentials, attachment_id: &str) -> Result<Vec<u8>>;

    /// Deletes an attachment.
    async fn delete(&self, credentials: &Credentials, attachment_id: &str) -> Result<()>;
}
