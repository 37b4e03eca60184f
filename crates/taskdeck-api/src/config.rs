//! HTTP client configuration.
//!
//! Reads from environment variables with defaults, so a test or a desktop
//! shell can point the client at any backend without a config file.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UPLOAD_LIMIT_MB: u32 = 25;

/// Configuration for [`HttpApiClient`](crate::HttpApiClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Upload limit the server enforces, in megabytes. Used only to phrase
    /// the 413 rejection message; the client never pre-validates size.
    pub upload_limit_mb: u32,
}

impl ApiConfig {
    /// Creates a configuration with the given base URL and default timeout
    /// and upload limit.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_limit_mb: DEFAULT_UPLOAD_LIMIT_MB,
        }
    }

    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Variables: `TASKDECK_API_URL`, `TASKDECK_API_TIMEOUT_SECS`,
    /// `TASKDECK_UPLOAD_LIMIT_MB`.
    pub fn from_env() -> Self {
        let base_url =
            env::var("TASKDECK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = env::var("TASKDECK_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let upload_limit_mb = env::var("TASKDECK_UPLOAD_LIMIT_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_UPLOAD_LIMIT_MB);

        tracing::debug!(
            "[ApiConfig] base_url: {}, timeout: {}s, upload limit: {}MB",
            base_url,
            timeout_secs,
            upload_limit_mb
        );

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            upload_limit_mb,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
