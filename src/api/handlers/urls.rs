//! Handlers for the REST url endpoints.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, MutationResponse, UrlResponse};
use crate::domain::entities::Capabilities;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a url.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "slug": "promo" }
/// ```
///
/// # Response
///
/// **201 Created** with the new url, or **200 OK** with `url: null` and the
/// list of violations (missing fields, duplicate slug, missing permission).
///
/// # Errors
///
/// Returns 400 Bad Request if the slug is longer than 255 characters.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(capabilities): Extension<Capabilities>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), AppError> {
    payload.validate()?;

    let result = state
        .url_service
        .create_url(&capabilities, payload.into())
        .await?;

    let status = if result.url.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(result.into())))
}

/// Loads a url by id.
///
/// # Endpoint
///
/// `GET /api/urls/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no url has this id.
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UrlResponse>, AppError> {
    let record = state
        .url_service
        .get_url(id)
        .await?
        .ok_or_else(|| AppError::not_found("Url not found", json!({ "id": id })))?;

    Ok(Json(record.into()))
}

/// Deletes a url, returning the removed record.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// Missing permission and unknown ids are reported in `errors` with 200 OK.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(capabilities): Extension<Capabilities>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>, AppError> {
    let result = state.url_service.delete_url(&capabilities, id).await?;

    Ok(Json(result.into()))
}
