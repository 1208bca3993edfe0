//! DTOs for url endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{CreateUrl, MutationResult};
use crate::domain::entities::UrlRecord;

/// Request to create a url. Both fields are optional at the wire level;
/// missing ones come back as violations, not as a 400.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    pub url: Option<String>,

    #[validate(length(max = 255, message = "Slug must be at most 255 characters"))]
    pub slug: Option<String>,
}

impl From<CreateUrlRequest> for CreateUrl {
    fn from(req: CreateUrlRequest) -> Self {
        CreateUrl {
            url: req.url,
            slug: req.slug,
        }
    }
}

/// A stored url as exposed over the API.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<UrlRecord> for UrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            id: record.id,
            slug: record.slug,
            url: record.target_url,
            created_at: record.created_at,
        }
    }
}

/// Outcome of a create or delete call.
///
/// ```json
/// { "url": null, "errors": ["url is required", "slug is required"] }
/// ```
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub url: Option<UrlResponse>,
    pub errors: Vec<String>,
}

impl From<MutationResult> for MutationResponse {
    fn from(result: MutationResult) -> Self {
        Self {
            url: result.url.map(Into::into),
            errors: result.errors,
        }
    }
}
