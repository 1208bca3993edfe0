//! GraphQL object and input types.

use async_graphql::{ID, InputObject, SimpleObject};

use crate::application::services::{CreateUrl, MutationResult};
use crate::domain::entities::UrlRecord;

/// A stored short url.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Url")]
pub struct UrlObject {
    pub id: ID,
    pub slug: String,
    pub url: String,
}

impl From<UrlRecord> for UrlObject {
    fn from(record: UrlRecord) -> Self {
        Self {
            id: ID(record.id.to_string()),
            slug: record.slug,
            url: record.target_url,
        }
    }
}

/// Mutation payload: the affected url, or the reasons nothing happened.
#[derive(Debug, Clone, SimpleObject)]
pub struct UrlResponse {
    pub url: Option<UrlObject>,
    pub errors: Vec<String>,
}

impl From<MutationResult> for UrlResponse {
    fn from(result: MutationResult) -> Self {
        Self {
            url: result.url.map(Into::into),
            errors: result.errors,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct UrlInput {
    pub url: Option<String>,
    pub slug: Option<String>,
}

impl From<UrlInput> for CreateUrl {
    fn from(input: UrlInput) -> Self {
        CreateUrl {
            url: input.url,
            slug: input.slug,
        }
    }
}
