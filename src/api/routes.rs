//! API route configuration.
//!
//! Every route here sees the caller's capabilities through
//! [`crate::api::middleware::auth`]; anonymous callers get an empty set.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, generate_slug_handler, get_url_handler,
    graphiql_handler, graphql_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// REST endpoints, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /urls`       - Create a url
/// - `GET    /urls/{id}`  - Load a url
/// - `DELETE /urls/{id}`  - Delete a url
/// - `GET    /slugs`      - Generate a slug candidate
pub fn rest_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{id}", get(get_url_handler).delete(delete_url_handler))
        .route("/slugs", get(generate_slug_handler))
}

/// GraphQL endpoint.
///
/// - `POST /graphql` - Queries and mutations
/// - `GET  /graphql` - GraphiQL IDE
pub fn graphql_routes() -> Router<AppState> {
    Router::new().route("/graphql", get(graphiql_handler).post(graphql_handler))
}
