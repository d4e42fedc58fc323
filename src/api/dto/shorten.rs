//! DTOs for link shortening endpoint.

use crate::domain::entities::UrlRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// `originalUrl` is optional at the serde level so that a missing field is
/// reported as a validation error instead of a body rejection. Format and
/// length are checked by the registry.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(required(message = "Invalid URL"))]
    pub original_url: Option<String>,
}

/// A URL record as returned by the API.
///
/// ```json
/// {
///   "originalUrl": "https://example.com/page",
///   "shortCode": "Xk3_a9Qz",
///   "shortUrl": "http://localhost:5000/Xk3_a9Qz",
///   "date": "2024-01-15T10:30:00Z",
///   "clicks": 0
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub date: DateTime<Utc>,
    pub clicks: i64,
}

impl From<UrlRecord> for UrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            original_url: record.original_url,
            short_code: record.short_code,
            short_url: record.short_url,
            date: record.created_at,
            clicks: record.clicks,
        }
    }
}
