//! URL registry: idempotent creation and click-tracked resolution.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_original_url;
use tracing::{debug, info, warn};

/// Maximum number of codes tried before creation gives up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Outcome of [`UrlRegistry::create_or_get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new record was written by this call.
    Created(UrlRecord),
    /// A record for the URL already existed and was returned unchanged.
    Existing(UrlRecord),
}

impl Registration {
    pub fn is_created(&self) -> bool {
        matches!(self, Registration::Created(_))
    }

    pub fn record(&self) -> &UrlRecord {
        match self {
            Registration::Created(record) | Registration::Existing(record) => record,
        }
    }

    pub fn into_record(self) -> UrlRecord {
        match self {
            Registration::Created(record) | Registration::Existing(record) => record,
        }
    }
}

/// Owns the short code to URL mapping and the click counters.
///
/// Holds no per-request state: every call goes to the repository, and
/// concurrency is delegated to the repository's atomic primitives. Each
/// repository call is bounded by `storage_timeout`.
pub struct UrlRegistry {
    repository: Arc<dyn UrlRepository>,
    code_generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    base_url: String,
    storage_timeout: Duration,
}

impl UrlRegistry {
    /// Creates a new registry.
    ///
    /// `base_url` is the prefix of every generated short URL, for example
    /// `https://sho.rt`.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        base_url: impl Into<String>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            code_generator,
            clock,
            base_url: base_url.into(),
            storage_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the record for `original_url`, creating it if needed.
    ///
    /// # Idempotence
    ///
    /// An existing record is returned as-is, counter included. Two concurrent
    /// calls for the same new URL both end up with the single record that won
    /// the conditional insert; the loser sees [`Registration::Existing`].
    ///
    /// # Code Collisions
    ///
    /// A candidate code already in use is discarded and a new one generated,
    /// up to 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is not an absolute
    /// `http`/`https` URL.
    ///
    /// Returns [`AppError::Storage`] on backend failure, timeout, or when no
    /// free code was found.
    pub async fn create_or_get(&self, original_url: &str) -> Result<Registration, AppError> {
        validate_original_url(original_url).map_err(|e| {
            debug!(reason = %e, "Rejected original URL");
            AppError::invalid_input("Invalid URL")
        })?;

        if let Some(existing) = self.find_by_original_url(original_url).await? {
            return Ok(Registration::Existing(existing));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_record = NewUrlRecord::new(
                original_url.to_string(),
                self.code_generator.generate(),
                &self.base_url,
                self.clock.now(),
            );
            let code = new_record.short_code.clone();

            let outcome = self
                .bounded(
                    "insert_if_absent",
                    self.repository.insert_if_absent(new_record),
                )
                .await?;

            match outcome {
                InsertOutcome::Inserted(record) => {
                    info!(code = %record.short_code, "Created short URL");
                    return Ok(Registration::Created(record));
                }
                InsertOutcome::OriginalUrlTaken => {
                    debug!("Lost creation race, returning the winning record");
                    return self
                        .find_by_original_url(original_url)
                        .await?
                        .map(Registration::Existing)
                        .ok_or_else(|| {
                            AppError::storage("record missing after original URL conflict")
                        });
                }
                InsertOutcome::CodeTaken => {
                    warn!(%code, attempt, "Short code collision, regenerating");
                }
            }
        }

        Err(AppError::storage(format!(
            "no free short code after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }

    /// Adds one click to `short_code` and returns its original URL.
    ///
    /// The increment is a single atomic repository operation, so concurrent
    /// redirects on the same code are all counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Storage`] on backend failure or timeout.
    pub async fn resolve_and_track(&self, short_code: &str) -> Result<String, AppError> {
        self.bounded(
            "increment_clicks",
            self.repository.increment_clicks(short_code),
        )
        .await?
        .ok_or_else(|| AppError::not_found("URL not found"))
    }

    /// Returns the record for `short_code` without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Storage`] on backend failure or timeout.
    pub async fn lookup(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        self.bounded("find_by_code", self.repository.find_by_code(short_code))
            .await?
            .ok_or_else(|| AppError::not_found("URL not found"))
    }

    /// Checks that storage is reachable within the timeout.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.bounded("ping", self.repository.ping()).await
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<UrlRecord>, AppError> {
        self.bounded(
            "find_by_original_url",
            self.repository.find_by_original_url(original_url),
        )
        .await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.storage_timeout, call)
            .await
            .map_err(|_| {
                AppError::storage(format!(
                    "{operation} timed out after {}ms",
                    self.storage_timeout.as_millis()
                ))
            })?
    }
}
