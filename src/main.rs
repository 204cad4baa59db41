//! Rewrite proxy binary.
//!
//! Loads configuration, initializes logging, binds the listener and runs
//! the HTTP server until shutdown.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use rewrite_proxy::config::{load_config, ProxyConfig};
use rewrite_proxy::observability::init_logging;
use rewrite_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "rewrite-proxy")]
#[command(about = "Pattern-based redirect and rewrite proxy", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        redirects = config.redirects.len(),
        rewrites = config.rewrites.len(),
        origin = config.origin.as_deref().unwrap_or("none"),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
