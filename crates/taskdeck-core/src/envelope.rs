//! The uniform success/failure wrapper returned by every store operation.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Code used for successful operations.
pub const CODE_OK: u16 = 200;

/// Uniform result wrapper for the UI boundary.
///
/// Every store operation resolves to an `Envelope` rather than a `Result`,
/// so callers branch on `code` and `data` presence instead of matching error
/// types. `code == 200` means success; any other value is a classified
/// failure code (an HTTP status passed through, or a synthetic code such as
/// 0 for "not authenticated").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// 200 on success, classified failure code otherwise.
    pub code: u16,
    /// Human-readable outcome description.
    pub message: String,
    /// Payload, present only on success (and only for operations that
    /// return one).
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Creates a success envelope carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: CODE_OK,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Creates a success envelope with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            code: CODE_OK,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a failure envelope from a classified error.
    pub fn failure(error: &ApiError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            data: None,
        }
    }

    /// True iff the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.code == CODE_OK
    }
}

impl<T> From<ApiError> for Envelope<T> {
    fn from(error: ApiError) -> Self {
        Self::failure(&error)
    }
}
