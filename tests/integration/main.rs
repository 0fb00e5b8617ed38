//! Integration tests for the gazelle and hippo services.
//!
//! `services` runs both routers over real sockets; `process` drives the
//! compiled binaries.

mod process;
mod services;
