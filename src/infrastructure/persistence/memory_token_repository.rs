//! In-memory implementation of token repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::sync::RwLock;

use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

/// Process-local token store paired with [`super::InMemoryUrlRepository`].
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: RwLock<Vec<ApiToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(e: impl std::fmt::Display) -> AppError {
    AppError::internal("Storage lock poisoned", json!({ "reason": e.to_string() }))
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_capabilities(&self, token_hash: &str) -> Result<Option<Vec<String>>, AppError> {
        let tokens = self.tokens.read().map_err(poisoned)?;

        Ok(tokens
            .iter()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .map(|t| t.capabilities.clone()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;

        if let Some(token) = tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        token_hash: &str,
        capabilities: &[String],
    ) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;

        if tokens.iter().any(|t| t.token_hash == token_hash) {
            return Err(AppError::conflict(
                "Token already exists",
                json!({ "name": name }),
            ));
        }

        let token = ApiToken {
            id: tokens.last().map_or(1, |t| t.id + 1),
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            capabilities: capabilities.to_vec(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.push(token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tokens.read().map_err(poisoned)?.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        Ok(tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        Ok(tokens.iter().find(|t| t.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;

        match tokens.iter_mut().find(|t| t.id == id && !t.is_revoked()) {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
