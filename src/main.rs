//! SILTA - collectd to InfluxDB translation relay
//!
//! ## Usage
//!
//! ```bash
//! # Run with defaults (listen on :8079, relay to localhost:8086)
//! silta
//!
//! # Diagnostic logging of bodies, samples, keys, and relay responses
//! silta --verbose
//!
//! # Point at a destination described in a TOML file
//! silta --config /etc/silta.toml
//! ```
//!
//! Recognized config keys: `protocol`, `host`, `db`, `user`, `password`.
//! A missing or unreadable file falls back to defaults; startup never fails
//! on configuration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use silta::config::Config;
use silta::relay::InfluxRelay;
use silta::server;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "silta", about = "collectd to InfluxDB translation relay")]
struct Args {
    /// Log request bodies, decoded samples, composed keys, and relay responses
    #[arg(long)]
    verbose: bool,

    /// Config file location (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // An explicit env filter wins over --verbose
    let default_filter = if args.verbose { "silta=debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(args.config.as_deref());
    let relay = Arc::new(InfluxRelay::new(config.series_url())?);
    info!(url = %relay.url(), "Starting relay");

    let addr = server::listen_addr();
    let app = server::router(relay);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
