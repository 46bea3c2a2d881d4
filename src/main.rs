//! hostprobe entry point.
//!
//! Initializes tracing, loads optional TOML configuration, builds the router
//! once, and serves it until SIGINT/SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostprobe::config::{AppConfig, DEFAULT_LOG_FILTER};
use hostprobe::http::start_server;
use hostprobe::{create_router, AppState};

/// hostprobe: greeting and host uptime over HTTP
#[derive(Parser, Debug)]
#[command(name = "hostprobe", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "hostprobe=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Loaded before tracing so the log format can come from the file
    let config = AppConfig::load_or_default(args.config.as_ref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    match &args.config {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    tracing::info!(
        program = %config.probe.program,
        args = ?config.probe.args,
        max_output_bytes = config.probe.max_output_bytes,
        "Uptime probe configured"
    );

    let state = AppState::new(&config.probe);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
