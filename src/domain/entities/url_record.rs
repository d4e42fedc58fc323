//! URL record entity: one short code mapped to one original URL.

use chrono::{DateTime, Utc};

/// A stored short link with its click counter.
///
/// `original_url` is kept exactly as submitted. `short_url` is derived once at
/// creation from the configured base and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

/// Input data for creating a new record.
///
/// Every field is filled by [`NewUrlRecord::new`]; the counter is not part of
/// the input because new records always start at zero clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlRecord {
    /// Builds a new record from its inputs.
    ///
    /// `short_url` is `base_url` with any trailing slashes removed, followed by
    /// `/` and the code.
    pub fn new(
        original_url: String,
        short_code: String,
        base_url: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        let short_url = short_url_for(base_url, &short_code);

        Self {
            original_url,
            short_code,
            short_url,
            created_at,
        }
    }

    /// Converts into the persisted shape with `clicks = 0`.
    pub fn into_record(self) -> UrlRecord {
        UrlRecord {
            original_url: self.original_url,
            short_code: self.short_code,
            short_url: self.short_url,
            created_at: self.created_at,
            clicks: 0,
        }
    }
}

/// Joins the base URL and a short code.
pub fn short_url_for(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}
