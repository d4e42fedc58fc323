//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::AppError;

/// PostgreSQL repository for URL records.
///
/// Uniqueness of `short_code` and `original_url` is enforced by the `urls`
/// table's unique constraints, so the conditional insert and the click
/// increment are each a single statement.
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
    original_url: String,
    short_code: String,
    short_url: String,
    created_at: DateTime<Utc>,
    clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord {
            original_url: row.original_url,
            short_code: row.short_code,
            short_url: row.short_url,
            created_at: row.created_at,
            clicks: row.clicks,
        }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT original_url, short_code, short_url, created_at, clicks
            FROM urls
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT original_url, short_code, short_url, created_at, clicks
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<InsertOutcome, AppError> {
        let inserted = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, short_code, short_url, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            RETURNING original_url, short_code, short_url, created_at, clicks
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_code)
        .bind(&new_record.short_url)
        .bind(new_record.created_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Inserted(row.into()));
        }

        // Nothing written: find out which constraint was hit.
        let url_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM urls WHERE original_url = $1)")
                .bind(&new_record.original_url)
                .fetch_one(self.pool.as_ref())
                .await?;

        if url_taken {
            Ok(InsertOutcome::OriginalUrlTaken)
        } else {
            Ok(InsertOutcome::CodeTaken)
        }
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<String>, AppError> {
        let original_url: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE urls
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING original_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(original_url)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
