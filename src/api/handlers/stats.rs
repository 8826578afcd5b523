//! Handler for link usage statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns usage statistics for an active link.
///
/// # Endpoint
///
/// `GET /links/{code}/stats`
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://example.com/",
///   "created_at": "2026-08-01T09:30:00Z",
///   "expires_at": null,
///   "clicks": 42,
///   "last_used": "2026-08-30T11:05:12Z"
/// }
/// ```
///
/// Clicks served straight from the cache are not reflected in the counter.
///
/// # Errors
///
/// Returns 404 `not_found` if the code is not an active link (expired links
/// live in the archive and are not reported here).
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.link_service.stats(&code).await?;

    Ok(Json(record.into()))
}
