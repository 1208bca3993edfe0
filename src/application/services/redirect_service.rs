//! Slug resolution for the redirect endpoint.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::target_url::{RedirectTarget, classify_target};

/// Result of resolving a slug. `NotFound` is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// No slug was requested at all.
    Empty,
    /// No record owns the slug, its target is empty or cannot be resolved.
    NotFound,
    /// Path on this service.
    Internal(String),
    /// Absolute URL elsewhere; operator-supplied, so the caller must mark it trusted.
    External(String),
}

/// Resolves slugs to redirect outcomes against the service origin.
pub struct RedirectService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    origin: Url,
}

impl<R: UrlRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    ///
    /// `origin` is the public base URL of this service; absolute targets on the
    /// same origin are treated as internal.
    pub fn new(repository: Arc<R>, origin: Url) -> Self {
        Self { repository, origin }
    }

    /// Looks up `slug` and classifies its target.
    ///
    /// Resolution has no side effects; resolving the same slug twice yields
    /// the same outcome while the record is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, slug: &str) -> Result<RedirectOutcome, AppError> {
        if slug.is_empty() {
            return Ok(RedirectOutcome::Empty);
        }

        let Some(record) = self.repository.find_by_slug_excluding(slug, &[]).await? else {
            debug!(slug, "Slug not found");
            return Ok(RedirectOutcome::NotFound);
        };

        if !record.has_target() {
            debug!(slug, id = record.id, "Record has no target");
            return Ok(RedirectOutcome::NotFound);
        }

        let outcome = match classify_target(&record.target_url, &self.origin) {
            Some(RedirectTarget::Internal(path)) => RedirectOutcome::Internal(path),
            Some(RedirectTarget::External(url)) => RedirectOutcome::External(url),
            None => RedirectOutcome::NotFound,
        };

        debug!(slug, id = record.id, outcome = ?outcome, "Slug resolved");

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::Utc;
    use serde_json::json;

    fn origin() -> Url {
        Url::parse("https://s.example.com").unwrap()
    }

    fn service_with_target(slug: &'static str, target: &'static str) -> RedirectService<MockUrlRepository> {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_by_slug_excluding()
            .withf(move |s, excluded| s == slug && excluded.is_empty())
            .returning(move |s, _| {
                Ok(Some(UrlRecord::new(1, s.to_string(), target.to_string(), Utc::now())))
            });

        RedirectService::new(Arc::new(mock_repo), origin())
    }

    #[tokio::test]
    async fn test_empty_slug_skips_lookup() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_by_slug_excluding().times(0);

        let service = RedirectService::new(Arc::new(mock_repo), origin());

        assert_eq!(service.resolve("").await.unwrap(), RedirectOutcome::Empty);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_by_slug_excluding()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = RedirectService::new(Arc::new(mock_repo), origin());

        assert_eq!(
            service.resolve("missing").await.unwrap(),
            RedirectOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_unsafe_stored_targets_are_not_found() {
        for target in ["   ", "https://example.org/a\r\nSet-Cookie: x=1"] {
            let service = service_with_target("bad", target);

            assert_eq!(
                service.resolve("bad").await.unwrap(),
                RedirectOutcome::NotFound,
                "{target:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_external_target() {
        let service = service_with_target("ext", "https://example.org/page?q=1");

        assert_eq!(
            service.resolve("ext").await.unwrap(),
            RedirectOutcome::External("https://example.org/page?q=1".to_string())
        );
    }

    #[tokio::test]
    async fn test_internal_target() {
        let service = service_with_target("about", "internal:/about");

        assert_eq!(
            service.resolve("about").await.unwrap(),
            RedirectOutcome::Internal("/about".to_string())
        );
    }

    #[tokio::test]
    async fn test_same_origin_target_is_internal() {
        let service = service_with_target("self", "https://s.example.com/docs#top");

        assert_eq!(
            service.resolve("self").await.unwrap(),
            RedirectOutcome::Internal("/docs#top".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_target_is_not_found() {
        let service = service_with_target("blank", "");

        assert_eq!(service.resolve("blank").await.unwrap(), RedirectOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_unresolvable_route_is_not_found() {
        let service = service_with_target("route", "route:user.login");

        assert_eq!(service.resolve("route").await.unwrap(), RedirectOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let service = service_with_target("twice", "https://example.org");

        let first = service.resolve("twice").await.unwrap();
        let second = service.resolve("twice").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_by_slug_excluding()
            .returning(|_, _| Err(AppError::internal("Storage error", json!({}))));

        let service = RedirectService::new(Arc::new(mock_repo), origin());

        assert!(matches!(
            service.resolve("any").await,
            Err(AppError::Internal { .. })
        ));
    }
}
