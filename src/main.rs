use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use function_grpc::{FunctionService, ServerConfig};
use namer_core::Namer;

/// Composition function that sets the external-name annotation of desired composed resources to
/// their metadata.name.
#[derive(Parser, Debug)]
#[command(name = "function-namer")]
#[command(about = "Sets crossplane.io/external-name on desired composed resources")]
struct Cli {
    /// Emit debug logs
    #[arg(long, short, env = "FUNCTION_DEBUG")]
    debug: bool,

    /// Address to listen on
    #[arg(long, env = "FUNCTION_ADDR", default_value = function_grpc::config::DEFAULT_ADDRESS)]
    address: SocketAddr,

    /// Directory containing tls.crt, tls.key and ca.crt
    #[arg(long, env = "TLS_SERVER_CERTS_DIR")]
    tls_server_certs_dir: Option<PathBuf>,

    /// Serve without TLS (local development only)
    #[arg(long, env = "FUNCTION_INSECURE")]
    insecure: bool,

    /// Register the gRPC reflection service
    #[arg(long, env = "FUNCTION_ENABLE_REFLECTION")]
    enable_reflection: bool,
}

/// Main entry point for the function
///
/// Resolves configuration from flags, environment and an optional `.env` file, then serves
/// `FunctionRunnerService` until interrupted.
///
/// # Environment Variables
/// - `FUNCTION_ADDR`: listen address (default: "0.0.0.0:9443")
/// - `TLS_SERVER_CERTS_DIR`: mutual TLS certificates directory
/// - `FUNCTION_INSECURE`, `FUNCTION_DEBUG`, `FUNCTION_ENABLE_REFLECTION`: boolean switches
/// - `RUST_LOG`: overrides the default log filter
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = log_filter(cli.debug, std::env::var("RUST_LOG").ok())?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::new(
        cli.address,
        cli.insecure,
        cli.tls_server_certs_dir,
        cli.enable_reflection,
    )?;

    tracing::info!("++ Starting function-namer on {}", config.address());

    let service = FunctionService::new(Namer::new());
    function_grpc::serve(&config, service, shutdown_signal()).await?;

    tracing::info!("function-namer stopped");
    Ok(())
}

/// Log filter: `RUST_LOG` when set, otherwise info (or debug) for this workspace's crates.
fn log_filter(debug: bool, rust_log: Option<String>) -> anyhow::Result<EnvFilter> {
    let directives = match rust_log.filter(|v| !v.trim().is_empty()) {
        Some(directives) => directives,
        None => {
            let level = if debug { "debug" } else { "info" };
            ["function_namer", "function_grpc", "namer_core", "tower_http"]
                .map(|target| format!("{target}={level}"))
                .join(",")
        }
    };
    Ok(EnvFilter::try_new(directives)?)
}

/// Resolves on Ctrl-C, or SIGTERM on unix (what the kubelet sends on pod shutdown).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
