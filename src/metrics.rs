//! Prometheus metrics for request counts and backend call latency.
//!
//! The recorder is installed once per process by [`init_metrics`]; the
//! returned handle backs the `/metrics` route.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Backend call latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Backend call failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "upstream_failures_total";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

/// Build a handle that is not installed as the global recorder.
///
/// Renders an empty exposition; used where no recorder may be installed,
/// such as routers built in tests.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn describe_metrics() {
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of handled HTTP requests by service and route"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Backend request latency in milliseconds"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of failed backend requests by reason"
    );

    debug!("Metrics initialized");
}

/// Increment the request counter for a route.
pub fn inc_requests(service: &'static str, route: &'static str) {
    counter!(METRIC_HTTP_REQUESTS, "service" => service, "route" => route).increment(1);
}

/// Increment the backend failure counter.
pub fn inc_upstream_failures(reason: &'static str) {
    counter!(METRIC_UPSTREAM_FAILURES, "reason" => reason).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
#[derive(Debug)]
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for a backend request.
pub fn timer_upstream() -> LatencyTimer {
    LatencyTimer::new(METRIC_UPSTREAM_LATENCY)
}
