//! Bearer token to capability resolution.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::Capabilities;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Service mapping API tokens to the capabilities they grant.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
///
/// Unknown and revoked tokens are not an error here: they simply grant nothing,
/// and the mutation service reports the missing permission as a violation.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves the capabilities granted by a raw bearer token.
    ///
    /// A missing, empty, unknown or revoked token yields the empty set. On a
    /// match the token's `last_used_at` is refreshed; a failure to do so is
    /// logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors during lookup.
    pub async fn capabilities(&self, token: Option<&str>) -> Result<Capabilities, AppError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(Capabilities::none());
        };

        let token_hash = self.hash_token(token);

        let Some(names) = self.repository.find_capabilities(&token_hash).await? else {
            debug!("Bearer token unknown or revoked");
            return Ok(Capabilities::none());
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(Capabilities::from_names(names))
    }

    /// Stores a new token granting `capabilities`. Only the hash is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the same raw token was already issued,
    /// [`AppError::Internal`] on database errors.
    pub async fn issue_token(
        &self,
        name: &str,
        token: &str,
        capabilities: &Capabilities,
    ) -> Result<ApiToken, AppError> {
        let token_hash = self.hash_token(token);
        self.repository
            .create_token(name, &token_hash, &capabilities.to_names())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Capability;
    use crate::domain::repositories::MockTokenRepository;
    use chrono::Utc;
    use serde_json::json;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_capabilities_for_valid_token() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);

        mock_repo
            .expect_find_capabilities()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(vec!["create".to_string(), "delete".to_string()])));

        mock_repo
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let caps = service.capabilities(Some(token)).await.unwrap();

        assert!(caps.can_create());
        assert!(caps.can_delete());
    }

    #[tokio::test]
    async fn test_unknown_token_grants_nothing() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_capabilities()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_update_last_used().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let caps = service.capabilities(Some("invalid-token")).await.unwrap();

        assert!(caps.is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_skips_lookup() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo.expect_find_capabilities().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.capabilities(None).await.unwrap().is_empty());
        assert!(service.capabilities(Some("")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_last_used_failure_is_ignored() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_capabilities()
            .returning(|_| Ok(Some(vec!["delete".to_string()])));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Storage error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let caps = service.capabilities(Some("token")).await.unwrap();

        assert!(!caps.can_create());
        assert!(caps.can_delete());
    }

    #[tokio::test]
    async fn test_lookup_error_propagates() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo
            .expect_find_capabilities()
            .returning(|_| Err(AppError::internal("Storage error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.capabilities(Some("token")).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash_and_names() {
        let mut mock_repo = MockTokenRepository::new();

        let expected_hash = compute_expected_hash("raw-token");
        mock_repo
            .expect_create_token()
            .withf(move |name, hash, caps| {
                name == "ci" && hash == expected_hash && caps == ["create".to_string()]
            })
            .times(1)
            .returning(|name, hash, caps| {
                Ok(ApiToken {
                    id: 1,
                    name: name.to_string(),
                    token_hash: hash.to_string(),
                    capabilities: caps.to_vec(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let caps: Capabilities = [Capability::Create].into_iter().collect();
        let token = service.issue_token("ci", "raw-token", &caps).await.unwrap();

        assert_eq!(token.name, "ci");
        assert_ne!(token.token_hash, "raw-token");
    }

    #[test]
    fn test_hash_token_consistency() {
        let service = AuthService::new(Arc::new(MockTokenRepository::new()), test_secret());

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(Arc::new(MockTokenRepository::new()), "secret-a".to_string());
        let svc2 = AuthService::new(Arc::new(MockTokenRepository::new()), "secret-b".to_string());

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
