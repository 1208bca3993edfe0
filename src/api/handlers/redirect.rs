//! Handlers for slug redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::{debug, warn};

use crate::application::services::RedirectOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Response header telling downstream proxies what kind of redirect was issued.
pub const REDIRECT_KIND_HEADER: &str = "x-redirect-kind";

const KIND_INTERNAL: &str = "internal";
const KIND_TRUSTED_EXTERNAL: &str = "trusted-external";

/// Redirects a slug to its target.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Responses
///
/// - **307** to an internal path, with `x-redirect-kind: internal`
/// - **307** to an external URL, with `x-redirect-kind: trusted-external`
/// - **307** to the configured not-found path when the slug is unknown, or
///   when its stored target cannot be sent as a `Location` header
///
/// # Errors
///
/// Returns 404 Not Found for unknown slugs when no not-found path is configured.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    resolve_slug(&state, &slug).await
}

/// Handles the empty slug (`GET /`) with a blank 200.
pub async fn root_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    resolve_slug(&state, "").await
}

/// Default landing page for unknown slugs.
///
/// # Endpoint
///
/// `GET /not-found`
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Url not found", json!({}))
}

async fn resolve_slug(state: &AppState, slug: &str) -> Result<Response, AppError> {
    let (location, kind) = match state.redirect_service.resolve(slug).await? {
        RedirectOutcome::Empty => return Ok(StatusCode::OK.into_response()),
        RedirectOutcome::Internal(path) => (path, KIND_INTERNAL),
        RedirectOutcome::External(url) => (url, KIND_TRUSTED_EXTERNAL),
        RedirectOutcome::NotFound => return not_found(state, slug),
    };

    if HeaderValue::from_str(&location).is_err() {
        warn!(slug, "Stored target is not a valid Location header");
        return not_found(state, slug);
    }

    Ok(redirect(&location, kind))
}

fn not_found(state: &AppState, slug: &str) -> Result<Response, AppError> {
    match state.not_found_path.as_deref() {
        Some(path) => {
            debug!(slug, fallback = path, "Redirecting unknown slug");
            Ok(Redirect::temporary(path).into_response())
        }
        None => Err(AppError::not_found(
            "Url not found",
            json!({ "slug": slug }),
        )),
    }
}

fn redirect(location: &str, kind: &'static str) -> Response {
    ([(REDIRECT_KIND_HEADER, kind)], Redirect::temporary(location)).into_response()
}
