//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::datetime::deserialize_opt_utc;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional caller-supplied short code instead of a generated one.
    pub custom_alias: Option<String>,

    /// Optional absolute expiry. Naive datetimes are interpreted as UTC.
    #[serde(default, deserialize_with = "deserialize_opt_utc")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Successful shorten response: the assigned code and canonical URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
}
