//! Hippo: the frontend service that calls gazelle and aggregates its answer.

pub mod client;
pub mod handlers;
pub mod routes;

pub use client::GazelleClient;
pub use handlers::{Envelope, HippoState};
pub use routes::create_router;
