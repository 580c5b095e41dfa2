//! Cocktail collection and item endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::db::{Cocktail, CocktailRepo, CocktailShort};
use crate::http::error::ApiError;
use crate::http::extractors::{CocktailId, JsonBody};
use crate::http::server::AppState;
use crate::models::{CocktailPatch, CocktailRequest, ValidationError};

/// Response to a batch create
#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub cocktails: Vec<Cocktail>,
}

/// Response to a full replace
#[derive(Serialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub cocktail: Cocktail,
}

/// Response to a partial update
#[derive(Serialize)]
pub struct PatchedResponse {
    pub message: String,
    pub updated_fields: Vec<&'static str>,
    pub cocktail: Cocktail,
}

/// Plain message response
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /cocktails - every cocktail with ingredients
async fn list_cocktails(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Cocktail>>, ApiError> {
    let cocktails = CocktailRepo::new(&state.pool).list().await?;
    if cocktails.is_empty() {
        return Err(ApiError::NoMatches {
            message: "There are no cocktails in the database".into(),
        });
    }
    Ok(Json(cocktails))
}

/// GET /cocktails/names - id and name of every cocktail
async fn list_names(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CocktailShort>>, ApiError> {
    let names = CocktailRepo::new(&state.pool).list_names().await?;
    Ok(Json(names))
}

/// POST /cocktails - create a batch of cocktails
async fn create_cocktails(
    State(state): State<Arc<AppState>>,
    JsonBody(requests): JsonBody<Vec<CocktailRequest>>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if requests.is_empty() {
        return Err(ValidationError::EmptyBatch.into());
    }

    let cocktails = requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            request
                .validate()
                .map_err(|e| ValidationError::cocktail(index, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let created = CocktailRepo::new(&state.pool).create_batch(cocktails).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: format!("{} cocktails created successfully!", created.len()),
            cocktails: created,
        }),
    ))
}

/// GET /cocktail/id/{id}
async fn get_cocktail(
    State(state): State<Arc<AppState>>,
    CocktailId(id): CocktailId,
) -> Result<Json<Cocktail>, ApiError> {
    let cocktail = CocktailRepo::new(&state.pool).get(id).await?;
    Ok(Json(cocktail))
}

/// PUT /cocktail/id/{id} - replace every field and the ingredient list
async fn replace_cocktail(
    State(state): State<Arc<AppState>>,
    CocktailId(id): CocktailId,
    JsonBody(request): JsonBody<CocktailRequest>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let cocktail = request.validate()?;
    let cocktail = CocktailRepo::new(&state.pool).replace(id, cocktail).await?;

    Ok(Json(UpdatedResponse {
        message: format!("Cocktail id={} updated successfully", id),
        cocktail,
    }))
}

/// PATCH /cocktail/id/{id} - update only the supplied fields
async fn patch_cocktail(
    State(state): State<Arc<AppState>>,
    CocktailId(id): CocktailId,
    JsonBody(patch): JsonBody<CocktailPatch>,
) -> Result<Json<PatchedResponse>, ApiError> {
    let changes = patch.validate()?;
    let updated_fields = changes.updated_fields();
    let cocktail = CocktailRepo::new(&state.pool).patch(id, changes).await?;

    Ok(Json(PatchedResponse {
        message: format!("Cocktail id={} updated successfully", id),
        updated_fields,
        cocktail,
    }))
}

/// DELETE /cocktail/id/{id}
async fn delete_cocktail(
    State(state): State<Arc<AppState>>,
    CocktailId(id): CocktailId,
) -> Result<Json<MessageResponse>, ApiError> {
    CocktailRepo::new(&state.pool).delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Cocktail id={} deleted successfully", id),
    }))
}

/// Cocktail routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cocktails", get(list_cocktails).post(create_cocktails))
        .route("/cocktails/", get(list_cocktails).post(create_cocktails))
        .route("/cocktails/names", get(list_names))
        .route(
            "/cocktail/id/{id}",
            get(get_cocktail)
                .put(replace_cocktail)
                .patch(patch_cocktail)
                .delete(delete_cocktail),
        )
}
