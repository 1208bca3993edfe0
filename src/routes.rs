//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Empty slug, blank 200
//! - `GET  /{slug}`      - Slug redirect (public)
//! - `GET  /not-found`   - Default landing page for unknown slugs
//! - `GET  /health`      - Storage health check (public)
//! - `/graphql`          - GraphQL endpoint and GraphiQL
//! - `/api/*`            - REST mirror of the GraphQL operations
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Capabilities** - Bearer token lookup on `/graphql` and `/api/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, redirect_handler, root_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes without rate limiting or path normalization.
///
/// Used directly by integration tests, which have no peer address to key
/// rate limits on.
pub fn base_router(state: AppState) -> Router {
    let authenticated = Router::new()
        .merge(api::routes::graphql_routes())
        .nest("/api", api::routes::rest_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/", get(root_handler))
        .route("/not-found", get(not_found_handler))
        .route("/health", get(health_handler))
        .route("/{slug}", get(redirect_handler))
        .merge(authenticated)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = if behind_proxy {
        base_router(state).layer(rate_limit::proxy_layer())
    } else {
        base_router(state).layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
