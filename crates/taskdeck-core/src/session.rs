//! Session credentials.

use serde::{Deserialize, Serialize};

/// The token/user-id pair for an authenticated session.
///
/// Modeled as a single value so the two fields are always set and unset
/// together: session state is `Option<Credentials>`, never a pair of
/// independently nullable fields. Every authenticated request reads one
/// snapshot of this pair, so a request can never carry a user id without
/// its matching token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Bearer token issued at login.
    pub token: String,
    /// Identifier of the authenticated user.
    pub user_id: String,
}

impl Credentials {
    /// Creates a credentials pair.
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }
}
