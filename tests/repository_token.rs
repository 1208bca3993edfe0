use sqlx::PgPool;
use std::sync::Arc;
use tinyurl::domain::repositories::TokenRepository;
use tinyurl::infrastructure::persistence::PgTokenRepository;

fn caps(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("test-token", "hash123", &caps(&["create"]))
        .await
        .unwrap();

    assert_eq!(token.name, "test-token");
    assert_eq!(token.token_hash, "hash123");
    assert_eq!(token.capabilities, caps(&["create"]));
    assert!(token.revoked_at.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_capabilities(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("editor", "editorhash", &caps(&["create", "delete"]))
        .await
        .unwrap();

    assert_eq!(
        repo.find_capabilities("editorhash").await.unwrap(),
        Some(caps(&["create", "delete"]))
    );
    assert!(repo.find_capabilities("nonexistent").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_revoked_token_has_no_capabilities(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("revoked-token", "revokedhash", &caps(&["create"]))
        .await
        .unwrap();

    assert!(repo.revoke_token(token.id).await.unwrap());
    assert!(!repo.revoke_token(token.id).await.unwrap());

    assert!(repo.find_capabilities("revokedhash").await.unwrap().is_none());
    assert!(repo.find_by_id(token.id).await.unwrap().unwrap().is_revoked());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_last_used(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("update-token", "updatehash", &[])
        .await
        .unwrap();
    assert!(token.last_used_at.is_none());

    repo.update_last_used("updatehash").await.unwrap();

    let reloaded = repo.find_by_name("update-token").await.unwrap().unwrap();
    assert!(reloaded.last_used_at.is_some());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_tokens(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("a", "hash-a", &[]).await.unwrap();
    repo.create_token("b", "hash-b", &[]).await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();
    let names: Vec<_> = tokens.iter().map(|t| t.name.as_str()).collect();

    assert_eq!(names, ["a", "b"]);
}
