//! Hippo frontend service entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};

use gazelle_hippo::api::{Service, ServiceContext};
use gazelle_hippo::config::HippoConfig;
use gazelle_hippo::hippo::{create_router, GazelleClient, HippoState};
use gazelle_hippo::host::hostname;
use gazelle_hippo::metrics;
use gazelle_hippo::server::{self, ShutdownOutcome};
use gazelle_hippo::utils::{init_logging, shutdown_signal};

/// Hippo frontend service.
#[derive(Parser, Debug)]
#[command(name = "hippo")]
#[command(about = "Frontend service aggregating its own and gazelle's host info")]
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
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.json_logs);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Serve { port }) => cmd_serve(port).await,
        None => cmd_serve(args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HIPPO - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match HippoConfig::load() {
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

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Resolving backend... ");
    let client = match GazelleClient::from_config(&config) {
        Ok(client) => {
            println!("OK");
            client
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Backend client setup failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Host: {}", hostname());
    println!("  Port: {}", config.port);
    println!("  Backend: {}", client.info_url());
    println!("  Backend Timeout: {}ms", client.timeout().as_millis());
    println!("  Shutdown Grace: {}s", config.shutdown_grace_secs);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the frontend until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = HippoConfig::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let client = GazelleClient::from_config(&config)?;
    info!("Backend found at: {}", client.info_url());

    let handle = metrics::init_metrics()?;
    let state = HippoState::new(
        ServiceContext::new(Service::Hippo, handle),
        hostname(),
        client,
    );

    let listener = server::bind(config.port).await?;
    info!("Hippo listening on port {}", config.port);

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
