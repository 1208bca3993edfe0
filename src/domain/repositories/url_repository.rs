//! Repository trait for url record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for slug → target URL records.
///
/// Every mutating call is durable before it returns. Slug uniqueness is
/// enforced here as the final guard; service-level checks only exist to turn a
/// duplicate into a readable violation before any write is attempted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `slug` or `target_url` is empty; this
    /// check happens before any storage I/O.
    ///
    /// Returns [`AppError::Conflict`] if another record already owns the slug.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Loads a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Loads the record owning `slug`, ignoring records whose id is in `excluded_ids`.
    ///
    /// Redirect lookups pass an empty exclusion list; uniqueness checks pass the
    /// id of the record being edited.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_slug_excluding(
        &self,
        slug: &str,
        excluded_ids: &[i64],
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Returns `true` iff a record with `slug` exists whose id is not in `excluded_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists_excluding(&self, slug: &str, excluded_ids: &[i64]) -> Result<bool, AppError>;

    /// Permanently removes a record.
    ///
    /// Returns `Ok(true)` if the record existed and was removed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Shared pre-storage check for [`UrlRepository::create`] implementations.
pub(crate) fn ensure_complete(new_record: &NewUrlRecord) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if new_record.slug.is_empty() {
        missing.push("slug");
    }
    if new_record.target_url.is_empty() {
        missing.push("target_url");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Url record is missing required fields",
            serde_json::json!({ "missing": missing }),
        ))
    }
}
