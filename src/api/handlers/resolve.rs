//! Handler for short code resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its original URL.
///
/// # Endpoint
///
/// `GET /links/{code}`
///
/// # Request Flow
///
/// 1. Lazy-expiration sweep of the store
/// 2. Cache lookup; a hit returns immediately (clicks are not counted
///    inside the cache TTL window)
/// 3. On miss, store lookup with a defensive expiry check
/// 4. Click counter and `last_used` updated, cache refreshed
///
/// # Errors
///
/// Returns 404 `not_found` for an unknown code and 404 `expired` when the
/// code exists but its expiry has passed (the record moves to the archive).
pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let original_url = state.link_service.resolve(&code).await?;

    Ok(Json(ResolveResponse { original_url }))
}
