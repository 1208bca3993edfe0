//! PostgreSQL implementation of url repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::domain::repositories::url_repository::ensure_complete;
use crate::error::AppError;

/// Name of the unique constraint guarding `urls.slug`.
const SLUG_CONSTRAINT: &str = "urls_slug_key";

/// PostgreSQL repository for url record storage and retrieval.
///
/// The `urls_slug_key` unique index is the authoritative uniqueness guard: two
/// concurrent inserts with the same slug cannot both commit.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    slug: String,
    target_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.id, row.slug, row.target_url, row.created_at)
    }
}

fn is_slug_conflict(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && matches!(db_err.constraint(), Some(SLUG_CONSTRAINT))
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        ensure_complete(&new_record)?;

        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (slug, target_url)
            VALUES ($1, $2)
            RETURNING id, slug, target_url, created_at
            "#,
        )
        .bind(&new_record.slug)
        .bind(&new_record.target_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_slug_conflict(&e) {
                AppError::conflict("Slug already exists", json!({ "slug": new_record.slug }))
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, slug, target_url, created_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug_excluding(
        &self,
        slug: &str,
        excluded_ids: &[i64],
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, slug, target_url, created_at
            FROM urls
            WHERE slug = $1 AND id <> ALL($2)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(slug)
        .bind(excluded_ids)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn exists_excluding(&self, slug: &str, excluded_ids: &[i64]) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM urls WHERE slug = $1 AND id <> ALL($2))",
        )
        .bind(slug)
        .bind(excluded_ids)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
