use std::net::SocketAddr;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

use gazelle_hippo::api::{Service, ServiceContext};
use gazelle_hippo::gazelle::{self, GazelleState};
use gazelle_hippo::hippo::{self, Envelope, GazelleClient, HippoState};
use gazelle_hippo::host::hostname;
use gazelle_hippo::metrics::detached_handle;
use gazelle_hippo::server::{self, ShutdownOutcome};

/// A service running on an ephemeral port.
struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<std::io::Result<ShutdownOutcome>>,
}

impl Running {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(self) -> ShutdownOutcome {
        self.stop.send(()).unwrap();
        self.handle.await.unwrap().unwrap()
    }
}

async fn spawn(router: axum::Router) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve(listener, router, Duration::from_secs(5), async move {
        let _ = rx.await;
    }));

    Running { addr, stop, handle }
}

async fn spawn_gazelle() -> Running {
    let ctx = ServiceContext::new(Service::Gazelle, detached_handle());
    spawn(gazelle::create_router(GazelleState::new(ctx, hostname(), Instant::now()))).await
}

async fn spawn_hippo(backend: &str, timeout: Duration) -> Running {
    let ctx = ServiceContext::new(Service::Hippo, detached_handle());
    let client = GazelleClient::new(&Url::parse(backend).unwrap(), timeout).unwrap();
    spawn(hippo::create_router(HippoState::new(ctx, hostname(), client))).await
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn hippo_forwards_gazelle_info() {
    let gazelle = spawn_gazelle().await;
    let hippo = spawn_hippo(&gazelle.url("/info"), Duration::from_secs(5)).await;

    let (status, body) = get_json(&hippo.url("/")).await;
    assert_eq!(status, 200);

    let envelope: Envelope = serde_json::from_value(body).unwrap();
    // The frontend reports the host it was addressed by, minus the port.
    assert_eq!(envelope.frontend.host, "127.0.0.1");
    assert_eq!(envelope.backend.host, hostname());

    assert_eq!(hippo.shutdown().await, ShutdownOutcome::Graceful);
    assert_eq!(gazelle.shutdown().await, ShutdownOutcome::Graceful);
}

#[tokio::test]
async fn hippo_reports_unavailable_once_gazelle_is_gone() {
    let gazelle = spawn_gazelle().await;
    let backend = gazelle.url("");
    assert_eq!(gazelle.shutdown().await, ShutdownOutcome::Graceful);

    let hippo = spawn_hippo(&backend, Duration::from_secs(1)).await;

    let (status, body) = get_json(&hippo.url("/")).await;
    assert_eq!(status, 503);
    assert_eq!(body["error"], "Service unavailable");

    // Health stays green regardless of the backend.
    let (status, body) = get_json(&hippo.url("/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "healthy", "service": "hippo"}));

    hippo.shutdown().await;
}

#[tokio::test]
async fn both_services_answer_404_on_unknown_paths() {
    let gazelle = spawn_gazelle().await;
    let hippo = spawn_hippo(&gazelle.url(""), Duration::from_secs(5)).await;

    for url in [gazelle.url("/missing"), hippo.url("/missing")] {
        let (status, body) = get_json(&url).await;
        assert_eq!(status, 404);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    hippo.shutdown().await;
    gazelle.shutdown().await;
}
