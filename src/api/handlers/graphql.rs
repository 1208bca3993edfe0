//! Handlers for the GraphQL endpoint and its in-browser IDE.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Extension, State},
    response::Html,
};

use crate::domain::entities::Capabilities;
use crate::state::AppState;

/// Executes a GraphQL request with the caller's capabilities attached.
///
/// # Endpoint
///
/// `POST /graphql`
pub async fn graphql_handler(
    State(state): State<AppState>,
    Extension(capabilities): Extension<Capabilities>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state
        .schema
        .execute(req.into_inner().data(capabilities))
        .await
        .into()
}

/// Serves GraphiQL pointed at `/graphql`.
///
/// # Endpoint
///
/// `GET /graphql`
pub async fn graphiql_handler() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
