//! Hippo HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::client::GazelleClient;
use crate::api::{ApiError, ServiceContext};
use crate::host::HostInfo;
use crate::metrics;

/// Application state shared with hippo handlers.
#[derive(Debug, Clone)]
pub struct HippoState {
    /// Health/metrics context.
    pub ctx: ServiceContext,
    /// Machine host name, used when a request carries no `Host` header.
    pub host: Arc<str>,
    /// Backend client.
    pub client: GazelleClient,
}

impl HippoState {
    /// Create new hippo state.
    pub fn new(ctx: ServiceContext, host: impl Into<Arc<str>>, client: GazelleClient) -> Self {
        Self {
            ctx,
            host: host.into(),
            client,
        }
    }
}

impl FromRef<HippoState> for ServiceContext {
    fn from_ref(state: &HippoState) -> Self {
        state.ctx.clone()
    }
}

/// Combined frontend/backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// This service.
    pub frontend: HostInfo,
    /// What gazelle reported.
    pub backend: HostInfo,
}

/// Host name the client addressed, with any port removed.
pub fn request_host(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::HOST)?.to_str().ok()?.trim();

    let host = if raw.starts_with('[') {
        // IPv6 literal: keep the brackets, drop the port.
        raw.find(']').map_or(raw, |end| &raw[..=end])
    } else {
        raw.rsplit_once(':').map_or(raw, |(host, _)| host)
    };

    (!host.is_empty()).then(|| host.to_string())
}

/// Root handler - calls gazelle and combines its answer with our own.
pub async fn index(
    State(state): State<HippoState>,
    headers: HeaderMap,
) -> Result<Json<Envelope>, ApiError> {
    metrics::inc_requests(state.ctx.service.into(), "/");
    info!("processing request");

    let backend = state.client.fetch_info().await.map_err(|e| {
        warn!(error = %e, "Backend request failed");
        ApiError::ServiceUnavailable
    })?;

    let host = request_host(&headers).unwrap_or_else(|| state.host.to_string());

    Ok(Json(Envelope {
        frontend: HostInfo::now(host),
        backend,
    }))
}
