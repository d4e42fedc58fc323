//! In-process implementation of the URL repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    by_code: HashMap<String, UrlRecord>,
    code_by_original_url: HashMap<String, String>,
}

/// Repository keeping records in memory behind a single lock.
///
/// Both indexes are updated under the same lock, which gives the conditional
/// insert and the click increment the same atomicity the PostgreSQL backend
/// gets from its constraints. Records do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryUrlRepository {
    tables: Mutex<Tables>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.tables.lock().await.by_code.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .code_by_original_url
            .get(original_url)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.tables.lock().await.by_code.get(code).cloned())
    }

    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<InsertOutcome, AppError> {
        let mut tables = self.tables.lock().await;

        if tables
            .code_by_original_url
            .contains_key(&new_record.original_url)
        {
            return Ok(InsertOutcome::OriginalUrlTaken);
        }

        if tables.by_code.contains_key(&new_record.short_code) {
            return Ok(InsertOutcome::CodeTaken);
        }

        let record = new_record.into_record();
        tables
            .code_by_original_url
            .insert(record.original_url.clone(), record.short_code.clone());
        tables
            .by_code
            .insert(record.short_code.clone(), record.clone());

        Ok(InsertOutcome::Inserted(record))
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut tables = self.tables.lock().await;

        Ok(tables.by_code.get_mut(code).map(|record| {
            record.clicks += 1;
            record.original_url.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
