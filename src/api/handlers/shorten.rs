//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use tracing::debug;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL, or returns the existing one.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/page" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: a new record was created
/// - **200 OK**: the URL was already shortened; the stored record is returned
///   unchanged (its click counter is not touched)
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON. Returns 400 with
/// `Invalid URL` if `originalUrl` is missing, is not a string, or is not an
/// absolute `http`/`https` URL.
/// Returns 500 Internal Server Error on storage failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(e) => {
            debug!(reason = %e.body_text(), "Rejected shorten body");
            AppError::invalid_input("Invalid URL")
        }
        other => other.into(),
    })?;
    payload.validate()?;

    let original_url = payload
        .original_url
        .ok_or_else(|| AppError::invalid_input("Invalid URL"))?;

    let registration = state.registry.create_or_get(&original_url).await?;

    let status = if registration.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(registration.into_record().into())))
}
