//! Hippo route definitions.

use axum::{routing::get, Router};

use super::handlers::{index, HippoState};
use crate::api::{finish_router, service_routes};

/// Create the hippo router.
pub fn create_router(state: HippoState) -> Router {
    let router = service_routes()
        .route("/", get(index))
        .with_state(state);

    finish_router(router)
}
