//! Gazelle and hippo: a backend and a frontend HTTP microservice.
//!
//! Gazelle reports its own host name, time, build and uptime. Hippo calls
//! gazelle once per request and wraps both answers in one envelope:
//!
//! ```text
//! GET hippo/            ──►  GET gazelle/info
//! {                          {"host": "gazelle-7f9c", "time": "..."}
//!   "frontend": {"host": "hippo-2a1b", "time": "..."},
//!   "backend":  {"host": "gazelle-7f9c", "time": "..."}
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`host`]: Host name and the `{host, time}` payload
//! - [`api`]: Shared handlers, errors and middleware
//! - [`gazelle`]: Backend service
//! - [`hippo`]: Frontend service and backend client
//! - [`server`]: Serve loop with graceful shutdown
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Signals and logging

pub mod api;
pub mod config;
pub mod error;
pub mod gazelle;
pub mod hippo;
pub mod host;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::{GazelleConfig, HippoConfig};
pub use error::{Result, ServiceError, UpstreamError};
