//! Url creation, lookup and deletion service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::slug_validator::{
    UniqueSlugValidator, duplicate_slug_violation, slug_length_violation,
    unreachable_slug_violation,
};
use crate::domain::entities::{Capabilities, NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::slug_generator::MAX_SLUG_LENGTH;
use crate::utils::target_url::is_valid_target;

pub const PERMISSION_VIOLATION: &str = "insufficient permissions";
pub const URL_REQUIRED_VIOLATION: &str = "url is required";
pub const URL_INVALID_VIOLATION: &str = "url is not a valid URI";
pub const SLUG_REQUIRED_VIOLATION: &str = "slug is required";
pub const NOT_FOUND_VIOLATION: &str = "not found";

/// Outcome of a url mutation: the affected record, if any, plus every
/// violation found.
///
/// Violations are collected rather than raised so that a single round trip
/// reports all of them. A non-empty `errors` list always means nothing was
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationResult {
    pub url: Option<UrlRecord>,
    pub errors: Vec<String>,
}

impl MutationResult {
    /// A result carrying a single violation and no record.
    pub fn violation(message: impl Into<String>) -> Self {
        Self {
            url: None,
            errors: vec![message.into()],
        }
    }

    pub fn add_violation(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Caller-supplied fields for a new url. Empty strings, and blank urls, count
/// as absent.
#[derive(Debug, Clone, Default)]
pub struct CreateUrl {
    pub url: Option<String>,
    pub slug: Option<String>,
}

impl CreateUrl {
    pub fn new(url: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            slug: Some(slug.into()),
        }
    }
}

/// Service orchestrating url mutations: permission check, validation, storage.
///
/// Permission failures short-circuit before any field is looked at. Field
/// violations are accumulated in a fixed order:
///
/// 1. url presence, then url validity
/// 2. slug presence, then slug length
/// 3. slug uniqueness
/// 4. slug reachability (single path segment, not a reserved route)
///
/// Storage failures are fatal and returned as `Err`.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    slug_validator: UniqueSlugValidator<R>,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new url service.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            slug_validator: UniqueSlugValidator::new(repository.clone()),
            repository,
        }
    }

    /// Fetches a url by id. No capability is required to read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_url(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Number of stored urls. Also serves as the storage health probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_urls(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Creates a url after checking the `create` capability and validating fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors. Validation and
    /// permission problems are reported in [`MutationResult::errors`].
    pub async fn create_url(
        &self,
        capabilities: &Capabilities,
        input: CreateUrl,
    ) -> Result<MutationResult, AppError> {
        if !capabilities.can_create() {
            warn!("Url creation rejected: missing create capability");
            return Ok(MutationResult::violation(PERMISSION_VIOLATION));
        }

        let target_url = input.url.filter(|url| !url.trim().is_empty());
        let slug = input.slug.filter(|slug| !slug.is_empty());

        let mut result = MutationResult::default();

        match target_url.as_deref() {
            None => result.add_violation(URL_REQUIRED_VIOLATION),
            Some(url) if !is_valid_target(url) => result.add_violation(URL_INVALID_VIOLATION),
            Some(_) => {}
        }

        match slug.as_deref() {
            None => result.add_violation(SLUG_REQUIRED_VIOLATION),
            Some(slug) if slug.chars().count() > MAX_SLUG_LENGTH => {
                result.add_violation(slug_length_violation(MAX_SLUG_LENGTH));
            }
            Some(slug) => {
                if !self.slug_validator.is_unique(slug, None).await? {
                    result.add_violation(duplicate_slug_violation(slug));
                }
                if let Some(violation) = unreachable_slug_violation(slug) {
                    result.add_violation(violation);
                }
            }
        }

        let (Some(target_url), Some(slug), true) = (target_url, slug, result.is_success()) else {
            debug!(errors = ?result.errors, "Url creation rejected by validation");
            return Ok(result);
        };

        match self
            .repository
            .create(NewUrlRecord::new(slug.clone(), target_url))
            .await
        {
            Ok(record) => {
                info!(id = record.id, slug = %record.slug, "Url created");
                result.url = Some(record);
            }
            Err(AppError::Conflict { .. }) => {
                debug!(slug = %slug, "Slug taken between validation and insert");
                result.add_violation(duplicate_slug_violation(&slug));
            }
            Err(e) => return Err(e),
        }

        Ok(result)
    }

    /// Deletes a url after checking the `delete` capability.
    ///
    /// On success the deleted record is returned in [`MutationResult::url`] so
    /// the caller can see what was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_url(
        &self,
        capabilities: &Capabilities,
        id: i64,
    ) -> Result<MutationResult, AppError> {
        if !capabilities.can_delete() {
            warn!(id, "Url deletion rejected: missing delete capability");
            return Ok(MutationResult::violation(PERMISSION_VIOLATION));
        }

        let Some(record) = self.repository.find_by_id(id).await? else {
            debug!(id, "Url to delete not found");
            return Ok(MutationResult::violation(NOT_FOUND_VIOLATION));
        };

        if !self.repository.delete(record.id).await? {
            debug!(id, "Url deleted concurrently");
            return Ok(MutationResult::violation(NOT_FOUND_VIOLATION));
        }

        info!(id = record.id, slug = %record.slug, "Url deleted");

        Ok(MutationResult {
            url: Some(record),
            errors: Vec::new(),
        })
    }
}
