//! Link record: the mapping between a short code and its original URL.

use chrono::{DateTime, Utc};

/// A stored short link with usage and lifecycle metadata.
///
/// `short_code` is the table key and never changes once assigned.
/// `clicks` only moves upward while the record is active; `last_used` is
/// set on every resolution that reaches the store (cache hits bypass both).
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: u64,
    pub last_used: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Creates a fresh record with zeroed usage counters.
    pub fn new(
        short_code: String,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            created_at: Utc::now(),
            expires_at,
            clicks: 0,
            last_used: None,
        }
    }

    /// Returns true if the record's expiry has passed at `now`.
    ///
    /// Records without an expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }

    /// Returns true if the record's expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
