//! Schema migrations for the cocktail tables

use sqlx::SqlitePool;
use tracing::info;

use super::DbError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS cocktails (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        glass TEXT NOT NULL,
        garnish TEXT,
        preparation TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_cocktails_name ON cocktails (name)",
    r#"
    CREATE TABLE IF NOT EXISTS ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cocktail_id INTEGER NOT NULL REFERENCES cocktails (id) ON DELETE CASCADE,
        ingredient TEXT,
        label TEXT,
        amount REAL,
        unit TEXT,
        special TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ingredients_cocktail ON ingredients (cocktail_id)",
    "CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients (ingredient)",
];

/// Create tables and indexes. Safe to run on every startup.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("database migrations complete");
    Ok(())
}
