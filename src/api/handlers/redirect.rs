//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Atomically increment the click counter for `code`
/// 2. Return 302 Found with `Location` set to the stored original URL
///
/// # Errors
///
/// Returns 404 Not Found with `{"error": "URL not found"}` if the code is unknown.
/// Returns 500 Internal Server Error on storage failure.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.registry.resolve_and_track(&code).await?;

    let location = location_header(&original_url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value.
///
/// Stored URLs are sent verbatim. URLs containing bytes a header cannot carry
/// (control characters the URL parser tolerates) fall back to their parsed
/// serialization.
fn location_header(original_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(original_url) {
        return Ok(value);
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| AppError::storage("stored URL cannot be used as a Location header"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_verbatim() {
        let value = location_header("https://example.com/page?q=1").unwrap();
        assert_eq!(value, "https://example.com/page?q=1");
    }

    #[test]
    fn test_location_header_control_characters_fall_back() {
        let value = location_header("https://example.com/a\nb").unwrap();
        assert_eq!(value, "https://example.com/ab");
    }
}
