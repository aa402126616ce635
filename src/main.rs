//! AMF Telemetry Exporter
//!
//! Process entry point: constructs the metrics registry, registers the AMF
//! instrument families, and blocks on the exposition serving loop. Either
//! startup step failing terminates the process with a diagnostic rather
//! than running with telemetry silently unavailable.

use std::net::SocketAddr;

use clap::Parser;
use prometheus::Registry;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use amf_telemetry::error::Result;
use amf_telemetry::{AmfStats, MetricsServer, METRICS_PORT};

// =============================================================================
// CLI Arguments
// =============================================================================

/// AMF Telemetry Exporter - NGAP and gNB session statistics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Metrics exposition port
    #[arg(long, env = "METRICS_PORT", default_value_t = METRICS_PORT)]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting AMF telemetry exporter");
    info!("  Exposition port: {}", args.port);

    let registry = Registry::new();

    // Protocol handlers clone this handle to record events; the exporter
    // itself only serves scrapes.
    let _stats = AmfStats::register(&registry).map_err(|e| {
        error!("AMF stats registration failed: {}", e);
        e
    })?;

    info!("AMF instrument families registered");

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let server = MetricsServer::bind(addr, registry).await.map_err(|e| {
        error!("Metrics server startup failed: {}", e);
        e
    })?;

    // Blocks for the remaining lifetime of the process.
    server.serve().await
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
