//! Bearer token to capability middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Resolves the caller's capabilities and stores them in request extensions.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Requests are never rejected here. A missing header, a malformed one, or an
/// unknown or revoked token all yield an empty
/// [`Capabilities`](crate::domain::entities::Capabilities) set, and handlers
/// report the missing permission as a violation.
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the token store cannot be queried.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let api = Router::new()
///     .route("/urls", post(create_url_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token);

    let capabilities = st.auth_service.capabilities(token.as_deref()).await?;
    parts.extensions.insert(capabilities);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
