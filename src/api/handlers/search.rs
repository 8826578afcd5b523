//! Handler for reverse lookup by original URL.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::links::{SearchQuery, SearchResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Finds a short code for a previously shortened URL.
///
/// # Endpoint
///
/// `GET /links/search?original_url=https://example.com`
///
/// Linear scan over the active table in insertion order; the first match
/// wins. The input is normalized before comparison, so cosmetic differences
/// (host case, default port, fragment) still match.
///
/// # Errors
///
/// Returns 404 `not_found` if no active link points at the URL.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let short_code = state.link_service.search_by_url(&query.original_url).await?;

    Ok(Json(SearchResponse { short_code }))
}
