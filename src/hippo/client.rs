//! HTTP client for the gazelle backend.

use std::time::Duration;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::HippoConfig;
use crate::error::{ServiceError, UpstreamError};
use crate::host::HostInfo;
use crate::metrics;

/// Client for gazelle's `/info` endpoint.
#[derive(Debug, Clone)]
pub struct GazelleClient {
    /// HTTP client for backend requests.
    http: reqwest::Client,
    /// Fully resolved `/info` URL.
    info_url: Url,
    /// Timeout applied to each request.
    timeout: Duration,
}

impl GazelleClient {
    /// Create a client for the backend at `base`.
    ///
    /// See [`resolve_info_url`] for how `base` maps to the requested URL.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, ServiceError> {
        let info_url = resolve_info_url(base)
            .map_err(|e| ServiceError::InvalidConfig(format!("cannot resolve info URL: {}", e)))?;

        if is_path_rewritten(base, &info_url) {
            warn!(
                configured = %base,
                resolved = %info_url,
                "Backend URL path does not end in /info, requesting the resolved URL instead"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            // One request per call; nothing is kept around between calls.
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            http,
            info_url,
            timeout,
        })
    }

    /// Create a client from validated hippo configuration.
    pub fn from_config(config: &HippoConfig) -> Result<Self, ServiceError> {
        let base = config.backend_url().map_err(ServiceError::InvalidConfig)?;
        Self::new(&base, config.upstream_timeout())
    }

    /// The URL requested by [`fetch_info`](Self::fetch_info).
    pub fn info_url(&self) -> &Url {
        &self.info_url
    }

    /// Timeout applied to each request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the backend's host info.
    #[instrument(skip(self), fields(url = %self.info_url))]
    pub async fn fetch_info(&self) -> Result<HostInfo, UpstreamError> {
        let _timer = metrics::timer_upstream();

        let result = self.request_info().await;
        if let Err(e) = &result {
            metrics::inc_upstream_failures(e.reason());
        }
        result
    }

    async fn request_info(&self) -> Result<HostInfo, UpstreamError> {
        let response = self
            .http
            .get(self.info_url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: self.info_url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let info: HostInfo = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        debug!(backend_host = %info.host, "Received backend info");

        Ok(info)
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout {
                url: self.info_url.to_string(),
                after: self.timeout,
            }
        } else {
            UpstreamError::Request {
                url: self.info_url.to_string(),
                source: err,
            }
        }
    }
}

/// Resolve the backend `/info` URL from the configured base.
///
/// `base` is joined with `info`, so `http://gazelle:3000` and
/// `http://gazelle:3000/info` resolve to the same endpoint. The query string
/// of `base` is carried over.
pub fn resolve_info_url(base: &Url) -> Result<Url, url::ParseError> {
    let mut info_url = base.join("info")?;
    info_url.set_query(base.query());
    Ok(info_url)
}

/// Whether resolving replaced a path the operator configured.
///
/// A bare host (`/`) or a directory-style base ending in `/` is expected to
/// gain `info`; anything else that changed was rewritten.
pub fn is_path_rewritten(base: &Url, resolved: &Url) -> bool {
    !base.path().ends_with('/') && base.path() != resolved.path()
}
