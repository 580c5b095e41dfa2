//! cocktaildb CLI - run and manage the cocktail database API
//!
//! - `serve`: run the HTTP API
//! - `migrate`: create or upgrade the schema
//! - `import`: bulk-load cocktails from a JSON file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cocktaildb_server::Settings;

mod commands;
mod tracing_setup;

use commands::import::ImportArgs;
use commands::migrate::MigrateArgs;
use commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(
    name = "cocktaildb",
    author,
    version,
    about = "Cocktail database API - create, read, update and delete cocktails"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to a TOML config file (default: ~/.cocktaildb/config.toml)
    #[arg(long, global = true, env = "COCKTAILDB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create or upgrade the database schema
    Migrate(MigrateArgs),
    /// Import cocktails from a JSON file
    Import(ImportArgs),
}

/// Load `.env` from the working directory, then from ~/.cocktaildb/.env.
/// Variables already set are never overridden.
fn load_dotenv() {
    dotenvy::dotenv().ok();
    dotenvy::from_path(Settings::data_dir().join(".env")).ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(settings, args).await?,
        Commands::Migrate(args) => commands::run_migrate(settings, args).await?,
        Commands::Import(args) => commands::run_import(settings, args).await?,
    }

    Ok(())
}
