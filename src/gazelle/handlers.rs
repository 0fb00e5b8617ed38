//! Gazelle HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{FromRef, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::api::ServiceContext;
use crate::host::HostInfo;
use crate::metrics;

/// Compiler version captured at build time.
pub const RUST_VERSION: &str = env!("GAZELLE_RUSTC_VERSION");

/// Application state shared with gazelle handlers.
#[derive(Debug, Clone)]
pub struct GazelleState {
    /// Health/metrics context.
    pub ctx: ServiceContext,
    /// Host name reported by `/info`.
    pub host: Arc<str>,
    /// Process start, for uptime.
    pub started: Instant,
}

impl GazelleState {
    /// Create new gazelle state.
    pub fn new(ctx: ServiceContext, host: impl Into<Arc<str>>, started: Instant) -> Self {
        Self {
            ctx,
            host: host.into(),
            started,
        }
    }

    /// Seconds since the process started.
    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

impl FromRef<GazelleState> for ServiceContext {
    fn from_ref(state: &GazelleState) -> Self {
        state.ctx.clone()
    }
}

/// `/info` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    /// Host name and response time.
    #[serde(flatten)]
    pub info: HostInfo,
    /// Compiler version the service was built with.
    pub rust_version: &'static str,
    /// Process uptime in seconds.
    pub uptime: f64,
}

/// Info handler - reports host, time, build and uptime.
pub async fn info(State(state): State<GazelleState>) -> impl IntoResponse {
    metrics::inc_requests(state.ctx.service.into(), "/info");

    Json(InfoResponse {
        info: HostInfo::now(state.host.as_ref()),
        rust_version: RUST_VERSION,
        uptime: state.uptime_secs(),
    })
}
