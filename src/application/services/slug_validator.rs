//! Slug uniqueness validation.

use std::sync::Arc;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Checks that a slug is not already used by another record.
///
/// Holds no state of its own; every answer comes from the repository. Callers
/// must reject empty slugs before asking, since presence is checked first.
pub struct UniqueSlugValidator<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> UniqueSlugValidator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns `true` when no record other than `excluded_id` owns `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn is_unique(&self, slug: &str, excluded_id: Option<i64>) -> Result<bool, AppError> {
        let excluded: Vec<i64> = excluded_id.into_iter().collect();
        let exists = self.repository.exists_excluding(slug, &excluded).await?;
        Ok(!exists)
    }
}

/// Top-level paths routed ahead of `/{slug}`.
pub const RESERVED_SLUGS: [&str; 4] = ["api", "graphql", "health", "not-found"];

pub const SLUG_SEGMENT_VIOLATION: &str = "slug must be a single path segment";

/// Violation message reported for a slug that is already taken.
pub fn duplicate_slug_violation(slug: &str) -> String {
    format!("The slug {} is not unique.", slug)
}

/// Violation message reported for a slug longer than `max` characters.
pub fn slug_length_violation(max: usize) -> String {
    format!("slug must be at most {} characters", max)
}

/// Returns the violation for a slug that `GET /{slug}` could never reach.
///
/// A slug must be one path segment (no `/`, `?`, `#` or control characters,
/// and not `.` or `..`) and must not shadow a fixed route.
pub fn unreachable_slug_violation(slug: &str) -> Option<String> {
    let multi_segment = slug == "."
        || slug == ".."
        || slug
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#') || c.is_control());

    if multi_segment {
        Some(SLUG_SEGMENT_VIOLATION.to_string())
    } else if RESERVED_SLUGS.contains(&slug) {
        Some(format!("The slug {} is reserved.", slug))
    } else {
        None
    }
}
