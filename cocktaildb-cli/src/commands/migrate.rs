//! Create or upgrade the database schema and exit

use anyhow::Result;
use clap::Parser;

use cocktaildb_server::Settings;

use super::open_database;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(settings: Settings, args: MigrateArgs) -> Result<()> {
    let pool = open_database(&settings, args.database_url).await?;
    pool.close().await;

    println!("Database is up to date");
    Ok(())
}
