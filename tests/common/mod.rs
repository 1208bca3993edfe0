#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tinyurl::application::services::CreateUrl;
use tinyurl::domain::entities::{Capabilities, Capability, NewUrlRecord, UrlRecord};
use tinyurl::domain::repositories::{TokenRepository, UrlRepository};
use tinyurl::infrastructure::persistence::{InMemoryTokenRepository, InMemoryUrlRepository};
use tinyurl::routes::base_router;
use tinyurl::state::AppState;
use url::Url;

pub const BASE_URL: &str = "https://s.example.com";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const CREATOR_TOKEN: &str = "creator-token";
pub const REVOKED_TOKEN: &str = "revoked-token";

/// In-memory state with three tokens: all capabilities, create only, and a
/// revoked all-capability one.
pub async fn create_test_state(not_found_path: Option<&str>) -> AppState {
    create_test_state_with_store(not_found_path).await.0
}

/// Like [`create_test_state`], also handing back the url store so tests can
/// write records that skip service validation.
pub async fn create_test_state_with_store(
    not_found_path: Option<&str>,
) -> (AppState, Arc<InMemoryUrlRepository>) {
    let store = Arc::new(InMemoryUrlRepository::new());
    let url_repo: Arc<dyn UrlRepository> = store.clone();
    let token_repo = Arc::new(InMemoryTokenRepository::new());

    let creator: Capabilities = [Capability::Create].into_iter().collect();

    let state = AppState::new(
        url_repo,
        token_repo.clone() as Arc<dyn TokenRepository>,
        Url::parse(BASE_URL).unwrap(),
        "test-signing-secret".to_string(),
        not_found_path.map(str::to_string),
    );

    state
        .auth_service
        .issue_token("admin", ADMIN_TOKEN, &Capabilities::all())
        .await
        .unwrap();
    state
        .auth_service
        .issue_token("creator", CREATOR_TOKEN, &creator)
        .await
        .unwrap();
    let revoked = state
        .auth_service
        .issue_token("revoked", REVOKED_TOKEN, &Capabilities::all())
        .await
        .unwrap();
    token_repo.revoke_token(revoked.id).await.unwrap();

    (state, store)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(base_router(state)).unwrap()
}

/// Stores a url directly through the service, bypassing HTTP.
pub async fn create_test_url(state: &AppState, slug: &str, target: &str) -> UrlRecord {
    let result = state
        .url_service
        .create_url(&Capabilities::all(), CreateUrl::new(target, slug))
        .await
        .unwrap();
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    result.url.unwrap()
}

/// Writes a record straight into the store, as data from an older release would be.
pub async fn insert_raw_url(store: &InMemoryUrlRepository, slug: &str, target: &str) -> UrlRecord {
    store.create(NewUrlRecord::new(slug, target)).await.unwrap()
}
