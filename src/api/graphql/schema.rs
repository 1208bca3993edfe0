//! Query and mutation roots.

use async_graphql::{Context, EmptySubscription, Error, ID, Object, Result, Schema};
use std::sync::Arc;

use super::types::{UrlInput, UrlObject, UrlResponse};
use crate::application::services::UrlService;
use crate::domain::entities::Capabilities;
use crate::domain::repositories::UrlRepository;
use crate::utils::slug_generator::{DEFAULT_SLUG_LENGTH, generate_slug};

pub type UrlSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema over a url service.
pub fn build_schema(url_service: Arc<UrlService<dyn UrlRepository>>) -> UrlSchema {
    Schema::build(
        QueryRoot {
            url_service: url_service.clone(),
        },
        MutationRoot { url_service },
        EmptySubscription,
    )
    .finish()
}

fn parse_id(id: &ID) -> Result<i64> {
    id.parse::<i64>()
        .map_err(|_| Error::new(format!("Invalid id: {}", id.as_str())))
}

fn capabilities(ctx: &Context<'_>) -> Capabilities {
    ctx.data_opt::<Capabilities>().cloned().unwrap_or_default()
}

pub struct QueryRoot {
    url_service: Arc<UrlService<dyn UrlRepository>>,
}

#[Object]
impl QueryRoot {
    /// Loads a url by id.
    async fn url(&self, id: ID) -> Result<Option<UrlObject>> {
        let id = parse_id(&id)?;
        let record = self.url_service.get_url(id).await?;
        Ok(record.map(Into::into))
    }

    /// Returns a random slug candidate. Uniqueness is not checked.
    async fn generate_slug(&self, length: Option<i32>) -> Result<String> {
        let length = match length {
            Some(n) => usize::try_from(n).unwrap_or(0),
            None => DEFAULT_SLUG_LENGTH,
        };
        Ok(generate_slug(length)?)
    }
}

pub struct MutationRoot {
    url_service: Arc<UrlService<dyn UrlRepository>>,
}

#[Object]
impl MutationRoot {
    /// Creates a url. Requires the `create` capability.
    async fn create_url(&self, ctx: &Context<'_>, data: UrlInput) -> Result<UrlResponse> {
        let result = self
            .url_service
            .create_url(&capabilities(ctx), data.into())
            .await?;
        Ok(result.into())
    }

    /// Deletes a url. Requires the `delete` capability.
    async fn delete_url(&self, ctx: &Context<'_>, id: ID) -> Result<UrlResponse> {
        let id = parse_id(&id)?;
        let result = self
            .url_service
            .delete_url(&capabilities(ctx), id)
            .await?;
        Ok(result.into())
    }
}
