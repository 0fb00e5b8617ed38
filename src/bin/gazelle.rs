//! Gazelle backend service entry point.

use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use gazelle_hippo::api::{Service, ServiceContext};
use gazelle_hippo::config::GazelleConfig;
use gazelle_hippo::gazelle::{create_router, GazelleState};
use gazelle_hippo::host::hostname;
use gazelle_hippo::metrics;
use gazelle_hippo::server::{self, ShutdownOutcome};
use gazelle_hippo::utils::{init_logging, shutdown_signal};

/// Gazelle backend service.
#[derive(Parser, Debug)]
#[command(name = "gazelle")]
#[command(about = "Backend service reporting host, time and uptime")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve HTTP requests (default).
    Serve {
        /// Listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started = Instant::now();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.json_logs);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Serve { port }) => cmd_serve(port, started).await,
        None => cmd_serve(args.port, started).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("GAZELLE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match GazelleConfig::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Host: {}", hostname());
    println!("  Port: {}", config.port);
    println!("  Shutdown Grace: {}s", config.shutdown_grace_secs);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the backend until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>, started: Instant) -> anyhow::Result<()> {
    let mut config = GazelleConfig::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    let handle = metrics::init_metrics()?;
    let state = GazelleState::new(
        ServiceContext::new(Service::Gazelle, handle),
        hostname(),
        started,
    );

    let listener = server::bind(config.port).await?;
    info!("Gazelle listening on port {}", config.port);

    let outcome = server::serve(
        listener,
        create_router(state),
        config.shutdown_grace(),
        shutdown_signal(),
    )
    .await?;

    if outcome == ShutdownOutcome::Forced {
        error!("Could not close connections in time, forcefully shutting down");
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}
