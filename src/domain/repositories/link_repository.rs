//! Repository trait for the primary short link store.

use crate::domain::entities::LinkRecord;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The primary record of truth for short links.
///
/// An associative table keyed by short code, with a companion archive table
/// holding expired records in the same key space. Archived and deleted codes
/// leave the active table and become available for explicit reuse as custom
/// aliases; the generator never hands them out again on its own (the code
/// space is large enough that regenerating one is negligible).
///
/// Expiration is lazy: nothing runs on a timer. [`Self::sweep_expired`] is
/// invoked by the service at the start of every operation and pays an O(n)
/// scan over the active table. Acceptable for the small live sets this
/// service targets; a larger deployment would keep a min-heap of expiry
/// times instead of scanning.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - process-local in-memory tables
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new record into the active table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeInUse`] if the code already denotes an
    /// active record.
    async fn insert(&self, record: LinkRecord) -> Result<(), AppError>;

    /// Looks up an active record by its short code.
    async fn find(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Increments the click counter and stamps `last_used` for an active
    /// record, returning the updated record.
    ///
    /// Returns `Ok(None)` if the code is not active.
    async fn record_visit(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<LinkRecord>, AppError>;

    /// Replaces the original URL of an active record in place.
    ///
    /// Clicks, expiry and timestamps are untouched. Returns `Ok(false)` if
    /// the code is not active.
    async fn update_url(&self, code: &str, new_url: &str) -> Result<bool, AppError>;

    /// Removes an active record entirely (no archival).
    ///
    /// Returns `Ok(false)` if the code is not active.
    async fn remove(&self, code: &str) -> Result<bool, AppError>;

    /// Moves a single active record into the archive.
    ///
    /// Used by the resolve path's defensive expiry check. Returns
    /// `Ok(false)` if the code is not active.
    async fn archive(&self, code: &str) -> Result<bool, AppError>;

    /// Moves every active record whose expiry is at or before `now` into
    /// the archive, in insertion order. Idempotent: already-archived codes
    /// are simply absent from the active table.
    ///
    /// Returns the codes that were archived by this pass.
    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError>;

    /// Linear scan for the first active record with this original URL, in
    /// insertion order.
    ///
    /// No reverse index is maintained; the active set is expected to be
    /// small.
    async fn find_by_url(&self, original_url: &str) -> Result<Option<String>, AppError>;

    /// Looks up a record in the expired-records archive.
    ///
    /// Archived records are retained for inspection and never served by
    /// normal lookups.
    async fn find_archived(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Number of records in the active table. Used by the health endpoint.
    async fn active_count(&self) -> Result<usize, AppError>;
}
