//! Error types for the taskdeck synchronization layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified failure for every store and remote-API operation.
///
/// Every failure a store can observe — local validation, a missing session,
/// a server rejection, or a transport fault — is expressed as one of these
/// variants. Stores convert the error into an [`Envelope`](crate::Envelope)
/// before it reaches a caller; no other error type crosses the store
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// Local pre-network validation failure (e.g. empty task title).
    /// Never corresponds to a request that was actually issued.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No credentials are present; the request was short-circuited locally.
    #[error("User not authenticated")]
    NotAuthenticated,

    /// The server rejected the credentials (401/403).
    #[error("Authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The referenced entity no longer exists on the server (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The uploaded payload exceeds the server limit (413). The message
    /// states the concrete limit so the UI can surface it verbatim.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Server-side failure (5xx) or a response that could not be parsed.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Network/connection failure; no response was received.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Creates a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a Server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a Transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// The envelope code this failure maps to.
    ///
    /// HTTP statuses pass through unchanged; synthetic failures use the
    /// reserved codes: 0 for a missing session, 400 for local validation,
    /// 500 when no response was received.
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotAuthenticated => 0,
            Self::Auth { status, .. } => *status,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::Server { status, .. } => *status,
            Self::Transport(_) => 500,
        }
    }

    /// Check if this is a local validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this failure is authentication-related, whether synthesized
    /// locally or surfaced from a 401/403 response.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Auth { .. })
    }

    /// Check if this is a NotFound failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_pass_http_statuses_through() {
        assert_eq!(ApiError::Auth { status: 401, message: "bad token".into() }.code(), 401);
        assert_eq!(ApiError::not_found("task gone").code(), 404);
        assert_eq!(ApiError::PayloadTooLarge("too big".into()).code(), 413);
        assert_eq!(ApiError::server(502, "bad gateway").code(), 502);
    }

    #[test]
    fn synthetic_codes() {
        assert_eq!(ApiError::NotAuthenticated.code(), 0);
        assert_eq!(ApiError::validation("title required").code(), 400);
        assert_eq!(ApiError::transport("connection refused").code(), 500);
    }

    #[test]
    fn auth_predicate_covers_both_sources() {
        assert!(ApiError::NotAuthenticated.is_auth());
        assert!(ApiError::Auth { status: 403, message: "forbidden".into() }.is_auth());
        assert!(!ApiError::not_found("x").is_auth());
    }
}
