mod common;

use axum_test::TestServer;
use serde_json::{Value, json};

async fn graphql(server: &TestServer, token: Option<&str>, query: &str) -> Value {
    let request = server.post("/graphql").json(&json!({ "query": query }));
    let request = match token {
        Some(token) => request.authorization_bearer(token),
        None => request,
    };

    let response = request.await;
    response.assert_status_ok();
    response.json::<Value>()
}

const CREATE_PROMO: &str = r#"
    mutation {
        createUrl(data: { url: "https://example.org/promo", slug: "promo" }) {
            url { id slug url }
            errors
        }
    }
"#;

#[tokio::test]
async fn test_create_url_then_redirect() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let body = graphql(&server, Some(common::CREATOR_TOKEN), CREATE_PROMO).await;

    assert_eq!(body["data"]["createUrl"]["errors"], json!([]));
    assert_eq!(body["data"]["createUrl"]["url"]["slug"], "promo");

    let redirect = server.get("/promo").await;
    assert_eq!(redirect.header("location"), "https://example.org/promo");
}

#[tokio::test]
async fn test_create_url_without_token() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let body = graphql(&server, None, CREATE_PROMO).await;

    assert_eq!(
        body["data"]["createUrl"],
        json!({ "url": null, "errors": ["insufficient permissions"] })
    );
}

#[tokio::test]
async fn test_create_url_duplicate_slug() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    graphql(&server, Some(common::ADMIN_TOKEN), CREATE_PROMO).await;
    let body = graphql(&server, Some(common::ADMIN_TOKEN), CREATE_PROMO).await;

    assert_eq!(
        body["data"]["createUrl"]["errors"],
        json!(["The slug promo is not unique."])
    );
}

#[tokio::test]
async fn test_create_url_missing_slug() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let body = graphql(
        &server,
        Some(common::ADMIN_TOKEN),
        r#"mutation { createUrl(data: { url: "https://example.org" }) { url { id } errors } }"#,
    )
    .await;

    assert_eq!(
        body["data"]["createUrl"],
        json!({ "url": null, "errors": ["slug is required"] })
    );
}

#[tokio::test]
async fn test_query_and_delete_url() {
    let state = common::create_test_state(Some("/not-found")).await;
    let record = common::create_test_url(&state, "temp", "base:pricing").await;
    let server = common::create_test_server(state);

    let body = graphql(
        &server,
        None,
        &format!(r#"{{ url(id: "{}") {{ id slug url }} }}"#, record.id),
    )
    .await;
    assert_eq!(
        body["data"]["url"],
        json!({ "id": record.id.to_string(), "slug": "temp", "url": "base:pricing" })
    );

    let body = graphql(
        &server,
        Some(common::ADMIN_TOKEN),
        &format!(r#"mutation {{ deleteUrl(id: "{}") {{ url {{ slug }} errors }} }}"#, record.id),
    )
    .await;
    assert_eq!(
        body["data"]["deleteUrl"],
        json!({ "url": { "slug": "temp" }, "errors": [] })
    );

    let body = graphql(
        &server,
        None,
        &format!(r#"{{ url(id: "{}") {{ id }} }}"#, record.id),
    )
    .await;
    assert_eq!(body["data"]["url"], Value::Null);
}

#[tokio::test]
async fn test_delete_requires_capability() {
    let state = common::create_test_state(Some("/not-found")).await;
    let record = common::create_test_url(&state, "stay", "https://example.org").await;
    let server = common::create_test_server(state);

    let body = graphql(
        &server,
        Some(common::CREATOR_TOKEN),
        &format!(r#"mutation {{ deleteUrl(id: "{}") {{ errors }} }}"#, record.id),
    )
    .await;

    assert_eq!(
        body["data"]["deleteUrl"]["errors"],
        json!(["insufficient permissions"])
    );
    assert_eq!(server.get("/stay").await.header("location"), "https://example.org");
}

#[tokio::test]
async fn test_generate_slug() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let body = graphql(&server, None, "{ generateSlug(length: 7) }").await;

    assert_eq!(body["data"]["generateSlug"].as_str().unwrap().len(), 7);
}

#[tokio::test]
async fn test_graphiql_page() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let response = server.get("/graphql").await;

    response.assert_status_ok();
    assert!(response.text().contains("graphiql"));
}

#[tokio::test]
async fn test_create_url_slug_length_matches_rest_limit() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state.clone());

    let query = format!(
        r#"mutation {{ createUrl(data: {{ url: "https://example.org", slug: "{}" }}) {{ url {{ id }} errors }} }}"#,
        "a".repeat(256)
    );
    let body = graphql(&server, Some(common::ADMIN_TOKEN), &query).await;

    assert_eq!(
        body["data"]["createUrl"],
        json!({ "url": null, "errors": ["slug must be at most 255 characters"] })
    );
    assert_eq!(state.url_service.count_urls().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_url_rejects_unreachable_slugs() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let body = graphql(
        &server,
        Some(common::ADMIN_TOKEN),
        r#"mutation { createUrl(data: { url: "https://example.org", slug: "graphql" }) { errors } }"#,
    )
    .await;
    assert_eq!(
        body["data"]["createUrl"]["errors"],
        json!(["The slug graphql is reserved."])
    );

    let body = graphql(
        &server,
        Some(common::ADMIN_TOKEN),
        r#"mutation { createUrl(data: { url: "https://example.org", slug: "a/b" }) { errors } }"#,
    )
    .await;
    assert_eq!(
        body["data"]["createUrl"]["errors"],
        json!(["slug must be a single path segment"])
    );
}
