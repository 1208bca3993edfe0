//! Url record entity representing a slug → target URL mapping.

use chrono::{DateTime, Utc};

/// A stored redirect: the public `slug` and the `target_url` it resolves to.
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub slug: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, slug: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            slug,
            target_url,
            created_at,
        }
    }

    /// Returns true if the record carries a target to redirect to.
    pub fn has_target(&self) -> bool {
        !self.target_url.trim().is_empty()
    }
}

/// Input data for creating a new url record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub slug: String,
    pub target_url: String,
}

impl NewUrlRecord {
    pub fn new(slug: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            target_url: target_url.into(),
        }
    }
}
