//! Handler for slug generation.

use axum::{Json, extract::Query};
use validator::Validate;

use crate::api::dto::slug::{SlugQuery, SlugResponse};
use crate::error::AppError;
use crate::utils::slug_generator::{DEFAULT_SLUG_LENGTH, generate_slug};

/// Returns a random slug candidate.
///
/// # Endpoint
///
/// `GET /api/slugs?length=10`
///
/// The slug is not reserved and may collide with an existing one; the
/// create call is where uniqueness is enforced.
///
/// # Errors
///
/// Returns 400 Bad Request if `length` is outside 1..=255.
pub async fn generate_slug_handler(
    Query(query): Query<SlugQuery>,
) -> Result<Json<SlugResponse>, AppError> {
    query.validate()?;

    let slug = generate_slug(query.length.unwrap_or(DEFAULT_SLUG_LENGTH))?;

    Ok(Json(SlugResponse { slug }))
}
