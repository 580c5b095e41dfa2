//! Bulk import of cocktails from a JSON file
//!
//! The file holds a JSON array in the same shape as the body of
//! `POST /cocktails`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use cocktaildb_server::db::CocktailRepo;
use cocktaildb_server::models::{CocktailRequest, NewCocktail};
use cocktaildb_server::Settings;

use super::open_database;

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// JSON file containing an array of cocktails
    pub file: PathBuf,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

fn read_cocktails(path: &Path) -> Result<Vec<NewCocktail>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let requests: Vec<CocktailRequest> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of cocktails", path.display()))?;

    requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            request
                .validate()
                .with_context(|| format!("cocktail #{} is invalid", index + 1))
        })
        .collect()
}

pub async fn run_import(settings: Settings, args: ImportArgs) -> Result<()> {
    let cocktails = read_cocktails(&args.file)?;
    if cocktails.is_empty() {
        bail!("{} contains no cocktails", args.file.display());
    }

    let pool = open_database(&settings, args.database_url).await?;
    let created = CocktailRepo::new(&pool)
        .create_batch(cocktails)
        .await
        .context("Failed to store cocktails")?;
    pool.close().await;

    println!("{} cocktails imported", created.len());
    Ok(())
}
