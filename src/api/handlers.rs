//! HTTP handlers shared by both services.

use std::any::Any;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::{debug, error};

use super::error::ApiError;
use crate::metrics;

/// Which service a router belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Service {
    /// Backend.
    Gazelle,
    /// Frontend.
    Hippo,
}

/// Per-service context every router carries.
#[derive(Clone)]
pub struct ServiceContext {
    /// Service name reported by `/health`.
    pub service: Service,
    /// Handle used to render `/metrics`.
    pub metrics: PrometheusHandle,
}

impl ServiceContext {
    /// Create a context for `service`.
    pub fn new(service: Service, metrics: PrometheusHandle) -> Self {
        Self { service, metrics }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Service name.
    pub service: Service,
}

/// Health check handler - always returns 200.
pub async fn health(State(ctx): State<ServiceContext>) -> impl IntoResponse {
    metrics::inc_requests(ctx.service.into(), "/health");

    Json(HealthResponse {
        status: "healthy",
        service: ctx.service,
    })
}

/// Prometheus exposition handler.
pub async fn render_metrics(State(ctx): State<ServiceContext>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        ctx.metrics.render(),
    )
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    debug!("no route matched");
    ApiError::NotFound
}

/// Turn a handler panic into a 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!(panic = %detail, "handler panicked");
    ApiError::Internal.into_response()
}
