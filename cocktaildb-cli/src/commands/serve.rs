//! HTTP server command
//!
//! Runs the cocktail API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use cocktaildb_server::http::run_server;
use cocktaildb_server::Settings;

use super::open_database;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "COCKTAILDB_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(mut settings: Settings, args: ServeArgs) -> Result<()> {
    if let Some(bind) = args.bind {
        settings.server.bind_addr = bind;
    }
    if args.cors_permissive {
        settings.server.cors_permissive = true;
    }
    if let Some(timeout) = args.timeout {
        settings.server.request_timeout_secs = timeout;
    }

    let pool = open_database(&settings, args.database_url).await?;

    tracing::info!("Starting cocktaildb server on {}", settings.server.bind_addr);

    // Blocks until shutdown
    run_server(pool, settings.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
