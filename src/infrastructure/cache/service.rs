//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur inside cache implementations.
///
/// These never cross the service boundary: callers see a miss or a silent
/// no-op instead.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Best-effort accelerator in front of the link store.
///
/// The cache is never the source of truth. Implementations must fail open:
/// any backend error is logged and reported as `Ok(None)` / `Ok(())` so that
/// an unavailable cache degrades every caller to a store lookup instead of
/// failing the request.
///
/// Entries carry the cache's own TTL, decoupled from the record's
/// `expires_at`. A cached URL can therefore outlive its record by up to the
/// TTL window; the resolve path evicts explicitly when it detects expiry.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// `Ok(Some(url))` on hit; `Ok(None)` on miss or backend error.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a code-to-URL mapping with an optional TTL override in
    /// seconds (implementation default applies when `None`).
    ///
    /// Write failures are logged and swallowed.
    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping. Used on delete and on expiry detection.
    async fn evict(&self, short_code: &str) -> CacheResult<()>;

    /// Reports whether the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
