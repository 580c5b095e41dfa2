//! Cocktail repository
//!
//! A cocktail is always read together with its ingredients:
//! - reads: one LEFT JOIN, rows folded into `Cocktail` values
//! - create/replace/patch: transaction over both tables
//! - delete: ingredients go with the row via ON DELETE CASCADE

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::models::{title_case, CocktailChanges, Glass, NewCocktail, NewIngredient};

/// Cocktail with its ingredients, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cocktail {
    pub id: i64,
    pub name: String,
    pub glass: Glass,
    pub garnish: Option<String>,
    pub preparation: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Ingredient line belonging to a cocktail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: i64,
    pub ingredient: Option<String>,
    pub label: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub special: Option<String>,
}

/// Id and name only, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CocktailShort {
    pub id: i64,
    pub name: String,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} {key} not found")]
    NotFound { resource: &'static str, key: String },

    #[error("unexpected value '{value}' in column {column}")]
    Corrupt { column: &'static str, value: String },
}

impl DbError {
    fn cocktail_id(id: i64) -> Self {
        Self::NotFound {
            resource: "Cocktail",
            key: format!("id={}", id),
        }
    }
}

const SELECT_COCKTAILS: &str = r#"
    SELECT
        c.id,
        c.name,
        c.glass,
        c.garnish,
        c.preparation,
        i.id AS ingredient_id,
        i.ingredient,
        i.label,
        i.amount,
        i.unit,
        i.special
    FROM cocktails c
    LEFT JOIN ingredients i ON i.cocktail_id = c.id
"#;

const ORDER_COCKTAILS: &str = "ORDER BY c.id, i.id";

/// Fold joined rows (ordered by cocktail id) into cocktails.
fn collect_cocktails(rows: Vec<SqliteRow>) -> Result<Vec<Cocktail>, DbError> {
    let mut cocktails: Vec<Cocktail> = Vec::new();

    for row in rows {
        let id: i64 = row.try_get("id")?;
        let starts_new = cocktails.last().map_or(true, |c| c.id != id);

        if starts_new {
            let glass: String = row.try_get("glass")?;
            let glass = glass.parse::<Glass>().map_err(|_| DbError::Corrupt {
                column: "glass",
                value: glass.clone(),
            })?;

            cocktails.push(Cocktail {
                id,
                name: row.try_get("name")?,
                glass,
                garnish: row.try_get("garnish")?,
                preparation: row.try_get("preparation")?,
                ingredients: Vec::new(),
            });
        }

        // NULL when the LEFT JOIN found no ingredients
        let ingredient_id: Option<i64> = row.try_get("ingredient_id")?;
        if let (Some(ingredient_id), Some(cocktail)) = (ingredient_id, cocktails.last_mut()) {
            cocktail.ingredients.push(Ingredient {
                id: ingredient_id,
                ingredient: row.try_get("ingredient")?,
                label: row.try_get("label")?,
                amount: row.try_get("amount")?,
                unit: row.try_get("unit")?,
                special: row.try_get("special")?,
            });
        }
    }

    Ok(cocktails)
}

async fn load_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Cocktail>, DbError> {
    let sql = format!("{SELECT_COCKTAILS} WHERE c.id = ? {ORDER_COCKTAILS}");
    let rows = sqlx::query(&sql).bind(id).fetch_all(&mut *conn).await?;
    Ok(collect_cocktails(rows)?.into_iter().next())
}

async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, DbError> {
    let (found,): (i64,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cocktails WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(found != 0)
}

async fn insert_ingredients(
    conn: &mut SqliteConnection,
    cocktail_id: i64,
    ingredients: &[NewIngredient],
) -> Result<(), DbError> {
    for item in ingredients {
        sqlx::query(
            r#"
            INSERT INTO ingredients (cocktail_id, ingredient, label, amount, unit, special)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(cocktail_id)
        .bind(item.ingredient.as_ref().map(|name| name.as_str()))
        .bind(item.label.as_deref())
        .bind(item.amount)
        .bind(item.unit.as_deref())
        .bind(item.special.as_deref())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

async fn replace_ingredients(
    conn: &mut SqliteConnection,
    cocktail_id: i64,
    ingredients: &[NewIngredient],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM ingredients WHERE cocktail_id = ?")
        .bind(cocktail_id)
        .execute(&mut *conn)
        .await?;
    insert_ingredients(conn, cocktail_id, ingredients).await
}

/// Cocktail repository
pub struct CocktailRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CocktailRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All cocktails with their ingredients, ordered by id.
    pub async fn list(&self) -> Result<Vec<Cocktail>, DbError> {
        let sql = format!("{SELECT_COCKTAILS} {ORDER_COCKTAILS}");
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;
        collect_cocktails(rows)
    }

    /// Id and name of every cocktail, ordered by id.
    pub async fn list_names(&self) -> Result<Vec<CocktailShort>, DbError> {
        let names = sqlx::query_as::<_, CocktailShort>("SELECT id, name FROM cocktails ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(names)
    }

    /// Get a single cocktail by id.
    pub async fn get(&self, id: i64) -> Result<Cocktail, DbError> {
        let mut conn = self.pool.acquire().await?;
        load_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| DbError::cocktail_id(id))
    }

    /// Get the first cocktail (lowest id) whose stored name equals the
    /// title-cased `name`.
    pub async fn find_by_name(&self, name: &str) -> Result<Cocktail, DbError> {
        let name = title_case(name.trim());
        debug!(%name, "looking up cocktail by name");

        let sql = format!(
            "{SELECT_COCKTAILS} WHERE c.id = (SELECT id FROM cocktails WHERE name = ? ORDER BY id LIMIT 1) {ORDER_COCKTAILS}"
        );
        let rows = sqlx::query(&sql).bind(name.as_str()).fetch_all(self.pool).await?;

        collect_cocktails(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                resource: "Cocktail",
                key: format!("name={}", name),
            })
    }

    /// Cocktails using an ingredient whose name equals the title-cased
    /// `ingredient`. Each cocktail appears once with its full ingredient list.
    pub async fn find_by_ingredient(&self, ingredient: &str) -> Result<Vec<Cocktail>, DbError> {
        let ingredient = title_case(ingredient.trim());
        debug!(%ingredient, "looking up cocktails by ingredient");

        let sql = format!(
            "{SELECT_COCKTAILS} WHERE c.id IN (SELECT cocktail_id FROM ingredients WHERE ingredient = ?) {ORDER_COCKTAILS}"
        );
        let rows = sqlx::query(&sql)
            .bind(ingredient.as_str())
            .fetch_all(self.pool)
            .await?;
        collect_cocktails(rows)
    }

    /// Insert a batch of cocktails with their ingredients.
    ///
    /// All-or-nothing: if any insert fails, none of the batch is kept.
    pub async fn create_batch(&self, cocktails: Vec<NewCocktail>) -> Result<Vec<Cocktail>, DbError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(cocktails.len());

        for cocktail in &cocktails {
            let id = sqlx::query(
                r#"
                INSERT INTO cocktails (name, glass, garnish, preparation)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(cocktail.name.as_str())
            .bind(cocktail.glass.as_str())
            .bind(cocktail.garnish.as_deref())
            .bind(cocktail.preparation.as_deref())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            insert_ingredients(&mut tx, id, &cocktail.ingredients).await?;
            ids.push(id);
        }

        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            let cocktail = load_by_id(&mut tx, id)
                .await?
                .ok_or_else(|| DbError::cocktail_id(id))?;
            created.push(cocktail);
        }

        tx.commit().await?;
        info!(count = created.len(), "created cocktails");
        Ok(created)
    }

    /// Overwrite every field of a cocktail and replace its ingredients.
    pub async fn replace(&self, id: i64, cocktail: NewCocktail) -> Result<Cocktail, DbError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE cocktails
            SET name = ?, glass = ?, garnish = ?, preparation = ?
            WHERE id = ?
            "#,
        )
        .bind(cocktail.name.as_str())
        .bind(cocktail.glass.as_str())
        .bind(cocktail.garnish.as_deref())
        .bind(cocktail.preparation.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(DbError::cocktail_id(id));
        }

        replace_ingredients(&mut tx, id, &cocktail.ingredients).await?;

        let cocktail = load_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::cocktail_id(id))?;
        tx.commit().await?;

        info!(id, "replaced cocktail");
        Ok(cocktail)
    }

    /// Apply a partial update. Only fields present in `changes` are written.
    pub async fn patch(&self, id: i64, changes: CocktailChanges) -> Result<Cocktail, DbError> {
        let mut tx = self.pool.begin().await?;

        if !exists(&mut tx, id).await? {
            return Err(DbError::cocktail_id(id));
        }

        if changes.touches_row() {
            let mut query = QueryBuilder::<Sqlite>::new("UPDATE cocktails SET ");
            let mut set = query.separated(", ");
            if let Some(name) = &changes.name {
                set.push("name = ").push_bind_unseparated(name.as_str().to_owned());
            }
            if let Some(glass) = changes.glass {
                set.push("glass = ").push_bind_unseparated(glass.as_str());
            }
            if let Some(garnish) = &changes.garnish {
                set.push("garnish = ").push_bind_unseparated(garnish.clone());
            }
            if let Some(preparation) = &changes.preparation {
                set.push("preparation = ")
                    .push_bind_unseparated(preparation.clone());
            }
            query.push(" WHERE id = ").push_bind(id);
            query.build().execute(&mut *tx).await?;
        }

        if let Some(ingredients) = &changes.ingredients {
            replace_ingredients(&mut tx, id, ingredients).await?;
        }

        let cocktail = load_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::cocktail_id(id))?;
        tx.commit().await?;

        info!(id, fields = ?changes.updated_fields(), "patched cocktail");
        Ok(cocktail)
    }

    /// Delete a cocktail. Its ingredients are removed by the foreign key
    /// cascade.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let deleted = sqlx::query("DELETE FROM cocktails WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::cocktail_id(id));
        }

        info!(id, "deleted cocktail");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, migrations};
    use crate::models::{CocktailName, CocktailPatch, CocktailRequest, IngredientName};
    use serde_json::json;

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    fn ingredient(name: &str, amount: f64, unit: &str) -> NewIngredient {
        NewIngredient {
            ingredient: Some(IngredientName::new(name).unwrap()),
            label: None,
            amount: Some(amount),
            unit: Some(unit.to_string()),
            special: None,
        }
    }

    fn negroni() -> NewCocktail {
        NewCocktail {
            name: CocktailName::new("negroni").unwrap(),
            glass: Glass::OldFashioned,
            garnish: Some("Orange peel".into()),
            preparation: Some("Stir with ice".into()),
            ingredients: vec![
                ingredient("gin", 3.0, "cl"),
                ingredient("campari", 3.0, "cl"),
                ingredient("sweet vermouth", 3.0, "cl"),
            ],
        }
    }

    fn gin_tonic() -> NewCocktail {
        NewCocktail {
            name: CocktailName::new("gin tonic").unwrap(),
            glass: Glass::Highball,
            garnish: None,
            preparation: None,
            ingredients: vec![ingredient("gin", 5.0, "cl"), ingredient("tonic", 10.0, "cl")],
        }
    }

    fn daiquiri_without_ingredients() -> NewCocktail {
        NewCocktail {
            name: CocktailName::new("daiquiri").unwrap(),
            glass: Glass::Martini,
            garnish: None,
            preparation: None,
            ingredients: vec![],
        }
    }

    #[tokio::test]
    async fn create_batch_returns_cocktails_with_ids() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);

        let created = repo.create_batch(vec![negroni(), gin_tonic()]).await.unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].name, "Negroni");
        assert_eq!(created[0].ingredients.len(), 3);
        assert_eq!(
            created[0].ingredients[2].ingredient.as_deref(),
            Some("Sweet Vermouth")
        );
        assert_eq!(created[1].glass, Glass::Highball);
        assert!(created[1].id > created[0].id);
    }

    #[tokio::test]
    async fn list_keeps_cocktails_without_ingredients() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        repo.create_batch(vec![negroni(), daiquiri_without_ingredients(), gin_tonic()])
            .await
            .unwrap();

        let all = repo.list().await.unwrap();

        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Negroni", "Daiquiri", "Gin Tonic"]);
        assert!(all[1].ingredients.is_empty());
        assert_eq!(all[2].ingredients.len(), 2);
    }

    #[tokio::test]
    async fn list_names_is_short_form() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let created = repo.create_batch(vec![negroni()]).await.unwrap();

        let names = repo.list_names().await.unwrap();
        assert_eq!(
            names,
            vec![CocktailShort {
                id: created[0].id,
                name: "Negroni".into()
            }]
        );
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = setup().await;
        let err = CocktailRepo::new(&pool).get(99).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(err.to_string(), "Cocktail id=99 not found");
    }

    #[tokio::test]
    async fn find_by_name_ignores_caller_casing() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        repo.create_batch(vec![negroni(), gin_tonic()]).await.unwrap();

        let found = repo.find_by_name("GIN tonic").await.unwrap();
        assert_eq!(found.name, "Gin Tonic");
        assert_eq!(found.ingredients.len(), 2);

        let err = repo.find_by_name("mojito").await.unwrap_err();
        assert_eq!(err.to_string(), "Cocktail name=Mojito not found");
    }

    #[tokio::test]
    async fn find_by_ingredient_returns_each_cocktail_once() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let mut double_gin = gin_tonic();
        double_gin.name = CocktailName::new("double gin").unwrap();
        double_gin.ingredients.push(ingredient("gin", 2.0, "cl"));
        repo.create_batch(vec![negroni(), double_gin, daiquiri_without_ingredients()])
            .await
            .unwrap();

        let found = repo.find_by_ingredient("gin").await.unwrap();

        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Negroni", "Double Gin"]);
        // full ingredient list, not only the matching rows
        assert_eq!(found[0].ingredients.len(), 3);
        assert_eq!(found[1].ingredients.len(), 3);

        assert!(repo.find_by_ingredient("mezcal").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_ingredients() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let id = repo.create_batch(vec![negroni()]).await.unwrap()[0].id;

        let replaced = repo.replace(id, gin_tonic()).await.unwrap();

        assert_eq!(replaced.id, id);
        assert_eq!(replaced.name, "Gin Tonic");
        assert_eq!(replaced.garnish, None);
        assert_eq!(replaced.ingredients.len(), 2);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn replace_missing_is_not_found() {
        let pool = setup().await;
        let err = CocktailRepo::new(&pool)
            .replace(7, negroni())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let id = repo.create_batch(vec![negroni()]).await.unwrap()[0].id;

        let patch: CocktailPatch =
            serde_json::from_value(json!({"garnish": null, "glass": "collins"})).unwrap();
        let patched = repo.patch(id, patch.validate().unwrap()).await.unwrap();

        assert_eq!(patched.name, "Negroni");
        assert_eq!(patched.glass, Glass::Collins);
        assert_eq!(patched.garnish, None);
        assert_eq!(patched.preparation.as_deref(), Some("Stir with ice"));
        assert_eq!(patched.ingredients.len(), 3);
    }

    #[tokio::test]
    async fn patch_can_replace_ingredients_alone() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let id = repo.create_batch(vec![negroni()]).await.unwrap()[0].id;

        let patch: CocktailPatch = serde_json::from_value(json!({
            "ingredients": [{"ingredient": "mezcal", "amount": 3, "unit": "cl"}]
        }))
        .unwrap();
        let patched = repo.patch(id, patch.validate().unwrap()).await.unwrap();

        assert_eq!(patched.ingredients.len(), 1);
        assert_eq!(patched.ingredients[0].ingredient.as_deref(), Some("Mezcal"));
    }

    #[tokio::test]
    async fn patch_missing_is_not_found() {
        let pool = setup().await;
        let changes = CocktailChanges {
            garnish: Some(Some("Lime".into())),
            ..Default::default()
        };
        let err = CocktailRepo::new(&pool).patch(3, changes).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_cascades_to_ingredients() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let created = repo.create_batch(vec![negroni(), gin_tonic()]).await.unwrap();

        repo.delete(created[0].id).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert!(matches!(
            repo.get(created[0].id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            repo.delete(created[0].id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn request_round_trip_through_repo() {
        let pool = setup().await;
        let repo = CocktailRepo::new(&pool);
        let request: CocktailRequest = serde_json::from_value(json!({
            "name": "irish coffee",
            "glass": "hot-drink",
            "ingredients": [{"ingredient": "irish whiskey", "label": "Jameson", "amount": 4, "unit": "cl"}]
        }))
        .unwrap();

        let created = repo
            .create_batch(vec![request.validate().unwrap()])
            .await
            .unwrap();
        let fetched = repo.get(created[0].id).await.unwrap();

        assert_eq!(fetched, created[0]);
        assert_eq!(fetched.glass, Glass::HotDrink);
        assert_eq!(fetched.ingredients[0].label.as_deref(), Some("Jameson"));
    }
}
