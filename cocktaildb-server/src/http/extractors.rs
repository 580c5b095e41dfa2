//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Single path segment, percent-decoded
async fn path_segment<S>(
    parts: &mut Parts,
    state: &S,
    param: &'static str,
) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let Path(segment): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::Validation(ValidationError::UndecodablePath { param }))?;
    Ok(segment)
}

/// Extract and validate a cocktail id from path
pub struct CocktailId(pub i64);

impl<S> FromRequestParts<S> for CocktailId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_segment(parts, state, "id").await?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ApiError::Validation(ValidationError::BadId { raw })),
        }
    }
}

/// Cocktail or ingredient name taken from the path, as typed
pub struct NameParam(pub String);

impl<S> FromRequestParts<S> for NameParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_segment(parts, state, "name").await.map(Self)
    }
}

/// JSON body whose rejections use the API error envelope.
///
/// Bodies that are not JSON, or JSON of the wrong shape, are 422. A missing
/// `content-type: application/json` stays 415.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let status = match &rejection {
                    JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    other => other.status(),
                };
                ApiError::InvalidBody {
                    status,
                    message: rejection.body_text(),
                }
            })?;
        Ok(Self(value))
    }
}
