//! DTOs for resolve, update, delete and search endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Resolve response carrying the destination URL.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub original_url: String,
}

/// Query parameters for the update endpoint (`PUT /links/{code}?new_url=`).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkQuery {
    #[validate(url(message = "Invalid URL format"))]
    pub new_url: String,
}

/// Query parameters for search-by-URL.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub original_url: String,
}

/// Search response: the first active code mapping to the URL.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub short_code: String,
}

/// Confirmation body for update and delete.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
