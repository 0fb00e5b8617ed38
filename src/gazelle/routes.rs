//! Gazelle route definitions.

use axum::{routing::get, Router};

use super::handlers::{info, GazelleState};
use crate::api::{finish_router, service_routes};

/// Create the gazelle router.
pub fn create_router(state: GazelleState) -> Router {
    let router = service_routes()
        .route("/info", get(info))
        .with_state(state);

    finish_router(router)
}
