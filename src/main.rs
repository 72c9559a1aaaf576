//! Caching HTTP forward proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 CACHING PROXY                   │
//!                    │                                                 │
//!   Client Request   │  ┌────────┐   ┌─────────┐   ┌───────────────┐  │
//!   ─────────────────┼─▶│ axum   │──▶│ logged  │──▶│    caching    │  │
//!                    │  │ server │   │transport│   │   transport   │  │
//!                    │  └────────┘   └─────────┘   └──────┬────────┘  │
//!                    │                                    │           │
//!                    │                         hit ┌──────┴─────┐     │
//!                    │                        ◀────│ LRU store  │     │
//!                    │                             └──────┬─────┘     │
//!                    │                              miss  │           │
//!                    │                             ┌──────▼─────┐     │
//!   Client Response  │                             │  upstream  │─────┼──▶ Origin
//!   ◀────────────────┼─────────────────────────────│  transport │     │
//!                    │                             └────────────┘     │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caching_proxy::config::{load_config, ProxyConfig};
use caching_proxy::http::ProxyServer;

#[derive(Parser, Debug)]
#[command(
    name = "caching-proxy",
    about = "HTTP forwarding proxy with an in-memory LRU response cache"
)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caching_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("caching-proxy v0.1.0 starting");

    let args = Args::parse();
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => ProxyConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        cache_capacity_bytes = config.cache.capacity_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        hsts = config.security.hsts,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            caching_proxy::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let server = ProxyServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
