//! Command implementations for the cocktaildb CLI

pub mod import;
pub mod migrate;
pub mod serve;

pub use import::run_import;
pub use migrate::run_migrate;
pub use serve::run_serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use cocktaildb_server::db::{create_pool_with_options, migrations};
use cocktaildb_server::Settings;

/// Open the configured database, creating its directory, and migrate it.
///
/// `url_override` comes from `--database-url` / `DATABASE_URL` and wins over
/// the config file.
pub async fn open_database(settings: &Settings, url_override: Option<String>) -> Result<SqlitePool> {
    let url = url_override.unwrap_or_else(|| settings.database.url.clone());

    if let Some(parent) = sqlite_file_path(&url).and_then(|p| p.parent().map(PathBuf::from)) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(&parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
            tracing::info!("Created database directory: {}", parent.display());
        }
    }

    tracing::debug!(%url, "opening database");
    let pool = create_pool_with_options(&url, settings.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", url))?;

    migrations::run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

/// File path behind a `sqlite:` URL, or None for in-memory databases.
fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
