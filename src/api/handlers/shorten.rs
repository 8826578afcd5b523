//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /links/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "custom_alias": "promo2026",              // optional
///   "expires_at": "2026-12-31T23:59:59Z"      // optional, naive = UTC
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "short_code": "aB3xZ9", "original_url": "https://example.com/" }
/// ```
///
/// The returned URL is the canonical (normalized) form that was stored.
///
/// # Errors
///
/// Returns 400 `validation_error` for a malformed URL or alias, and
/// 400 `code_in_use` if the custom alias denotes an active link.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let record = state
        .link_service
        .create(payload.original_url, payload.custom_alias, payload.expires_at)
        .await?;

    Ok(Json(ShortenResponse {
        short_code: record.short_code,
        original_url: record.original_url,
    }))
}
