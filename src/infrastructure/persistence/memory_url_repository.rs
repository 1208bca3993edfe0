//! In-memory implementation of url repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::domain::repositories::url_repository::ensure_complete;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    records: BTreeMap<i64, UrlRecord>,
    last_id: i64,
}

impl Store {
    fn matching<'a>(
        &'a self,
        slug: &'a str,
        excluded_ids: &'a [i64],
    ) -> impl Iterator<Item = &'a UrlRecord> + 'a {
        self.records
            .values()
            .filter(move |r| r.slug == slug && !excluded_ids.contains(&r.id))
    }
}

/// Process-local url store used when no database is configured, and in tests.
///
/// The slug check and the insert run under one write lock, so concurrent
/// creates with the same slug cannot both succeed. Ids are never reused within
/// the lifetime of the repository.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    store: RwLock<Store>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, AppError> {
        self.store
            .read()
            .map_err(|e| AppError::internal("Storage lock poisoned", json!({ "reason": e.to_string() })))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, AppError> {
        self.store
            .write()
            .map_err(|e| AppError::internal("Storage lock poisoned", json!({ "reason": e.to_string() })))
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        ensure_complete(&new_record)?;

        let mut store = self.write()?;

        if store.matching(&new_record.slug, &[]).next().is_some() {
            return Err(AppError::conflict(
                "Slug already exists",
                json!({ "slug": new_record.slug }),
            ));
        }

        store.last_id += 1;
        let record = UrlRecord::new(
            store.last_id,
            new_record.slug,
            new_record.target_url,
            Utc::now(),
        );
        store.records.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    async fn find_by_slug_excluding(
        &self,
        slug: &str,
        excluded_ids: &[i64],
    ) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.read()?.matching(slug, excluded_ids).next().cloned())
    }

    async fn exists_excluding(&self, slug: &str, excluded_ids: &[i64]) -> Result<bool, AppError> {
        Ok(self.read()?.matching(slug, excluded_ids).next().is_some())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write()?.records.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.read()?.records.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
