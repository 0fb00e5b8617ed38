//! Gazelle: the backend service reporting its own host, time and uptime.

pub mod handlers;
pub mod routes;

pub use handlers::GazelleState;
pub use routes::create_router;
