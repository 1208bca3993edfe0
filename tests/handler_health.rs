mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state(Some("/not-found")).await;
    common::create_test_url(&state, "one", "https://example.org").await;
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(
        json["checks"]["storage"]["message"],
        "Connected, 1 urls stored"
    );
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let state = common::create_test_state(Some("/not-found")).await;
    let server = common::create_test_server(state);

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checks"].get("storage").is_some());
}
