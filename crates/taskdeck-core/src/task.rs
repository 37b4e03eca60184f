//! Task domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task owned by the current user.
///
/// Instances originate from the server: `id` is server-assigned and
/// immutable, `is_completed` and `updated_at` change on a completion toggle,
/// and the entity disappears from the local collection on a successful
/// delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned unique identifier.
    pub id: String,
    /// Non-empty task title.
    pub title: String,
    /// Free-form description, may be empty.
    pub description: String,
    /// Completion flag; toggled only after server confirmation.
    pub is_completed: bool,
    /// Creation timestamp, server clock.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp, server clock.
    pub updated_at: DateTime<Utc>,
}
