//! HTTP transport for the taskdeck synchronization client.
//!
//! Implements the remote-API traits from `taskdeck-core` against the REST
//! backend with reqwest.

pub mod config;
pub mod http;

pub use config::ApiConfig;
pub use http::HttpApiClient;
