//! Handlers for link update and deletion.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::links::{DetailResponse, UpdateLinkQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Replaces the destination URL of an active link.
///
/// # Endpoint
///
/// `PUT /links/{code}?new_url=https://new-destination.com`
///
/// Clicks, expiry and creation time are untouched; only the destination
/// changes. The cache entry is refreshed so the next resolve serves the new
/// URL immediately.
///
/// # Errors
///
/// Returns 404 `not_found` for an unknown code and 400 `validation_error`
/// for a malformed URL.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<UpdateLinkQuery>,
) -> Result<Json<DetailResponse>, AppError> {
    query.validate()?;

    state.link_service.update(&code, query.new_url).await?;

    Ok(Json(DetailResponse::new("Link updated successfully")))
}

/// Deletes an active link.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// The record is removed from the active table outright; unlike expiry it
/// is not archived. The cache entry is evicted immediately, and the code
/// becomes available for reuse as a custom alias.
///
/// # Errors
///
/// Returns 404 `not_found` if the code is not an active link.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DetailResponse>, AppError> {
    state.link_service.delete(&code).await?;

    Ok(Json(DetailResponse::new("Link deleted successfully")))
}
