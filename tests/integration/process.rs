use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port()
}

fn wait_until_listening(port: u16) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while TcpStream::connect(("127.0.0.1", port)).is_err() {
        assert!(Instant::now() < deadline, "service never listened on {}", port);
        sleep(Duration::from_millis(50));
    }
}

#[cfg(unix)]
fn terminate(child: &Child) {
    let killed = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());
}

#[test]
fn hippo_exits_1_without_backend() {
    let status = Command::new(env!("CARGO_BIN_EXE_hippo"))
        .env_remove("GAZELLE")
        .env("PORT", "0")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
}

#[test]
fn hippo_check_config_fails_without_backend() {
    let output = Command::new(env!("CARGO_BIN_EXE_hippo"))
        .arg("check-config")
        .env_remove("GAZELLE")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("GAZELLE"));
}

#[cfg(unix)]
#[test]
fn gazelle_exits_0_on_sigterm() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gazelle"))
        .env("PORT", "0")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    // Give the server time to install its signal handlers.
    sleep(Duration::from_secs(1));

    terminate(&child);

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(0));
}

#[cfg(unix)]
#[test]
fn hippo_exits_0_on_sigterm() {
    let port = free_port();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hippo"))
        .env("GAZELLE", "http://127.0.0.1:9")
        .env("PORT", port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    wait_until_listening(port);
    terminate(&child);

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(0));
}

#[cfg(unix)]
#[test]
fn hippo_exits_1_when_grace_period_expires() {
    // Accepts connections but never answers, so the root request stays in flight.
    let backend = TcpListener::bind("127.0.0.1:0").unwrap();
    let backend_url = format!("http://{}", backend.local_addr().unwrap());

    let port = free_port();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hippo"))
        .env("GAZELLE", backend_url)
        .env("PORT", port.to_string())
        .env("UPSTREAM_TIMEOUT_MS", "30000")
        .env("SHUTDOWN_GRACE_SECS", "1")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    wait_until_listening(port);

    let mut client = TcpStream::connect(("127.0.0.1", port)).unwrap();
    client
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .unwrap();
    // Let hippo reach the backend before signalling.
    let _upstream = backend.accept().unwrap();

    let started = Instant::now();
    terminate(&child);

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(started.elapsed() < Duration::from_secs(20));
}
