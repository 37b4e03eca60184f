//! Attachment domain model and upload payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file attached to the user's account, optionally linked to a task.
///
/// `task_id == None` means the attachment is standalone; a link is only ever
/// established through an explicit attach operation, never implicitly at
/// fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Server-assigned unique identifier.
    pub id: String,
    /// Original filename as uploaded.
    pub filename: String,
    /// MIME content type reported at upload.
    pub content_type: String,
    /// Creation timestamp, server clock.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp, server clock.
    pub updated_at: DateTime<Utc>,
    /// Id of the linked task, or `None` when standalone.
    pub task_id: Option<String>,
}

/// Payload handed to the upload operations.
///
/// The caller owns the bytes; the store never inspects or pre-validates the
/// size — classifying a server-side rejection is the store's job, rejecting
/// before the request is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Filename to report to the server (multipart `file` field).
    pub filename: String,
    /// MIME content type of the payload.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload payload.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}
