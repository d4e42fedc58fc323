//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of a conditional insert.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The record was written.
    Inserted(UrlRecord),
    /// A record for the same original URL already exists. Nothing was written.
    OriginalUrlTaken,
    /// The short code is already used by another record. Nothing was written.
    CodeTaken,
}

/// Storage contract for URL records.
///
/// Implementations must provide two atomic primitives: a conditional insert
/// that never writes a second record for the same code or original URL, and a
/// click increment that cannot lose updates under concurrent calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the record for an original URL (exact string match).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by short code without touching its counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Inserts the record unless its code or original URL is already present.
    ///
    /// When both conflict, [`InsertOutcome::OriginalUrlTaken`] wins so that
    /// callers resolve the race by returning the existing record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn insert_if_absent(&self, new_record: NewUrlRecord) -> Result<InsertOutcome, AppError>;

    /// Atomically adds one click and returns the original URL.
    ///
    /// Returns `Ok(None)` if no record has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn increment_clicks(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
