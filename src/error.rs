//! Unified error types for the gazelle and hippo services.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for both services.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Failures of a single frontend-to-backend request.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Backend did not answer within the configured timeout.
    #[error("request to {url} timed out after {}ms", after.as_millis())]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        after: Duration,
    },

    /// Backend answered with a non-2xx status.
    #[error("request to {url} failed: HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status returned by the backend.
        status: StatusCode,
    },

    /// Backend body was not the expected JSON.
    #[error("failed to parse backend response: {0}")]
    Decode(String),

    /// Connection or transport failure.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Request { .. } => "request",
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
