//! Route and middleware setup shared by both services.

use axum::{extract::FromRef, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{handle_panic, health, not_found, render_metrics, ServiceContext};

/// Routes every service exposes: `/health` and `/metrics`.
pub fn service_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ServiceContext: FromRef<S>,
{
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
}

/// Attach the 404 fallback, panic recovery, and request tracing.
pub fn finish_router(router: Router) -> Router {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
