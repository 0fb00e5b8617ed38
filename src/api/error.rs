//! JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// No route matched.
    NotFound,
    /// The backend could not be reached or answered badly.
    ServiceUnavailable,
    /// A handler failed unexpectedly.
    Internal,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Short error label.
    pub error: &'static str,
    /// Human readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    pub fn body(self) -> ErrorBody {
        match self {
            Self::NotFound => ErrorBody {
                error: "Not found",
                message: None,
            },
            Self::ServiceUnavailable => ErrorBody {
                error: "Service unavailable",
                message: Some("Backend service is unavailable"),
            },
            Self::Internal => ErrorBody {
                error: "Internal server error",
                message: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
