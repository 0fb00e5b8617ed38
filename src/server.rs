//! HTTP listener with graceful shutdown and a forced-exit watchdog.
//!
//! Once the shutdown future resolves the listener stops accepting and
//! in-flight requests drain. If draining outlasts the grace period the
//! serve loop gives up and reports [`ShutdownOutcome::Forced`].

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

/// How the serve loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All in-flight requests finished within the grace period.
    Graceful,
    /// The grace period elapsed with requests still running.
    Forced,
}

impl ShutdownOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Graceful => 0,
            Self::Forced => 1,
        }
    }
}

/// Bind the service listener on all interfaces.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr).await
}

/// Serve `router` until `shutdown` resolves and connections drain, or the
/// grace period runs out.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    grace: Duration,
    shutdown: F,
) -> std::io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, mut draining_rx) = watch::channel(false);

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = draining_tx.send(true);
        })
        .into_future();

    let watchdog = async move {
        // A closed channel means the server already returned.
        if draining_rx.wait_for(|draining| *draining).await.is_err() {
            std::future::pending::<()>().await;
        }
        info!(grace_secs = grace.as_secs_f64(), "Draining in-flight requests");
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        biased;

        result = server => {
            result?;
            info!("Server stopped gracefully");
            Ok(ShutdownOutcome::Graceful)
        }
        _ = watchdog => {
            warn!("Grace period elapsed with requests in flight, forcing shutdown");
            Ok(ShutdownOutcome::Forced)
        }
    }
}
