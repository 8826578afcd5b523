//! DTOs for the link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkRecord;

/// Usage statistics for a single active link.
///
/// `created_at` is the stored creation time (the field is set once at
/// insert and reported verbatim).
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: u64,
    pub last_used: Option<DateTime<Utc>>,
}

impl From<LinkRecord> for StatsResponse {
    fn from(record: LinkRecord) -> Self {
        Self {
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            clicks: record.clicks,
            last_used: record.last_used,
        }
    }
}
