//! Lookups by cocktail name and by ingredient

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::db::{Cocktail, CocktailRepo};
use crate::http::error::ApiError;
use crate::http::extractors::NameParam;
use crate::http::server::AppState;

/// GET /cocktail/name/{name}
async fn by_name(
    State(state): State<Arc<AppState>>,
    NameParam(name): NameParam,
) -> Result<Json<Cocktail>, ApiError> {
    let cocktail = CocktailRepo::new(&state.pool).find_by_name(&name).await?;
    Ok(Json(cocktail))
}

/// GET /ingredient/{name} - cocktails that use the ingredient
async fn by_ingredient(
    State(state): State<Arc<AppState>>,
    NameParam(name): NameParam,
) -> Result<Json<Vec<Cocktail>>, ApiError> {
    let cocktails = CocktailRepo::new(&state.pool)
        .find_by_ingredient(&name)
        .await?;

    if cocktails.is_empty() {
        return Err(ApiError::NoMatches {
            message: format!("No cocktails with ingredient {} found", name),
        });
    }
    Ok(Json(cocktails))
}

/// Lookup routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cocktail/name/{name}", get(by_name))
        .route("/ingredient/{name}", get(by_ingredient))
}
