//! HTTP pieces shared by both services: health, metrics, errors, middleware.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::{Service, ServiceContext};
pub use routes::{finish_router, service_routes};
