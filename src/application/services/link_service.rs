//! Link lifecycle orchestration: create, resolve, stats, update, delete, search.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_normalizer::normalize_url;

/// Collision retry budget for generated codes. With a 62^6 space and small
/// live sets, a second attempt is already rare.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Coordinates the primary store and the read cache.
///
/// Every operation starts with a lazy-expiration sweep of the store, so
/// expired records become invisible no later than the next request.
///
/// Cache writes and evictions are best-effort: failures are logged and the
/// operation proceeds, because the store alone decides correctness.
pub struct LinkService {
    store: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    code_length: usize,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        code_length: usize,
    ) -> Self {
        Self {
            store,
            cache,
            code_length,
        }
    }

    /// Creates a short link for `original_url`.
    ///
    /// The URL is normalized to canonical form before storage. With a custom
    /// alias the alias is validated and used as the code; otherwise a code
    /// is generated with bounded collision retry. The new mapping is primed
    /// into the cache.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed URL or alias
    /// - [`AppError::CodeInUse`] if the alias denotes an active record
    /// - [`AppError::Internal`] if code generation exhausts its retries
    pub async fn create(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<LinkRecord, AppError> {
        self.sweep().await?;

        let normalized = normalize_url(&original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let record = if let Some(alias) = custom_alias {
            validate_custom_alias(&alias)?;

            let record = LinkRecord::new(alias, normalized, expires_at);
            // The store's insert is the collision authority; a retired code
            // may be reclaimed here since it no longer sits in the active table.
            self.store.insert(record.clone()).await?;
            record
        } else {
            self.insert_with_generated_code(normalized, expires_at)
                .await?
        };

        self.refresh_cache(&record.short_code, &record.original_url)
            .await;

        Ok(record)
    }

    /// Resolves a short code to its original URL.
    ///
    /// The cache is consulted first. A cache hit returns immediately and
    /// deliberately skips the click counter and `last_used`: click accuracy
    /// is traded for read latency inside the cache TTL window. On a miss
    /// the store is authoritative; a successful store resolution counts the
    /// click, stamps `last_used` and refreshes the cache.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code denotes no active record
    /// - [`AppError::Expired`] if the record's expiry has passed; the record
    ///   is archived and its cache entry evicted
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.sweep().await?;

        match self.cache.get_url(code).await {
            Ok(Some(url)) => return Ok(url),
            Ok(None) => {}
            Err(e) => warn!(error = %e, code, "Cache lookup failed, falling back to store"),
        }

        let record = self
            .store
            .find(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        let now = Utc::now();
        if record.is_expired_at(now) {
            // The sweep at entry already archived everything expired at that
            // instant; this catches an expiry landing between sweep and lookup.
            self.store.archive(code).await?;
            if let Err(e) = self.cache.evict(code).await {
                warn!(error = %e, code, "Failed to evict expired link from cache");
            }
            return Err(AppError::expired(
                "Link has expired",
                json!({ "code": code }),
            ));
        }

        let updated = self
            .store
            .record_visit(code, now)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        self.refresh_cache(code, &updated.original_url).await;

        Ok(updated.original_url)
    }

    /// Returns the full record for an active code, including the stored
    /// creation time and usage counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not active (including
    /// codes that have been swept into the archive).
    pub async fn stats(&self, code: &str) -> Result<LinkRecord, AppError> {
        self.sweep().await?;

        self.store
            .find(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Replaces the original URL of an active record, leaving clicks and
    /// expiry untouched, and refreshes the cache with the new destination.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed URL
    /// - [`AppError::NotFound`] if the code is not active
    pub async fn update(&self, code: &str, new_url: String) -> Result<LinkRecord, AppError> {
        self.sweep().await?;

        let normalized = normalize_url(&new_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if !self.store.update_url(code, &normalized).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        self.refresh_cache(code, &normalized).await;

        // update_url just returned true, so the record is present.
        self.store
            .find(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Removes an active record outright (no archival) and evicts its cache
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not active.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        self.sweep().await?;

        if !self.store.remove(code).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        if let Err(e) = self.cache.evict(code).await {
            warn!(error = %e, code, "Failed to evict deleted link from cache");
        }

        Ok(())
    }

    /// Finds the first active code mapping to `original_url`, in insertion
    /// order. The input is normalized first so it compares against stored
    /// canonical forms.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed URL
    /// - [`AppError::NotFound`] if no active record matches
    pub async fn search_by_url(&self, original_url: &str) -> Result<String, AppError> {
        self.sweep().await?;

        let normalized = normalize_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        self.store.find_by_url(&normalized).await?.ok_or_else(|| {
            AppError::not_found("Link not found", json!({ "original_url": normalized }))
        })
    }

    /// Runs the lazy-expiration sweep over the active table.
    ///
    /// Cache entries for swept records are left to age out within the cache
    /// TTL; only the resolve path evicts eagerly on expiry detection.
    async fn sweep(&self) -> Result<(), AppError> {
        let swept = self.store.sweep_expired(Utc::now()).await?;
        if !swept.is_empty() {
            debug!(swept = ?swept, "Lazy expiration sweep archived links");
        }
        Ok(())
    }

    /// Generates a code and inserts the record, retrying on collision.
    ///
    /// The insert itself is the collision check so there is no window
    /// between "code is free" and "record stored".
    async fn insert_with_generated_code(
        &self,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<LinkRecord, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let code = generate_code(self.code_length);
            let record = LinkRecord::new(code, original_url.clone(), expires_at);

            match self.store.insert(record.clone()).await {
                Ok(()) => return Ok(record),
                Err(AppError::CodeInUse { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Best-effort cache write; failure is logged and ignored.
    async fn refresh_cache(&self, code: &str, url: &str) {
        if let Err(e) = self.cache.set_url(code, url, None).await {
            warn!(error = %e, code, "Failed to refresh cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::{CacheResult, NullCache};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Cache double that records writes/evictions and serves preset entries.
    #[derive(Default)]
    struct SpyCache {
        entries: Mutex<HashMap<String, String>>,
        evicted: Mutex<Vec<String>>,
    }

    impl SpyCache {
        fn preloaded(code: &str, url: &str) -> Self {
            let cache = Self::default();
            cache
                .entries
                .lock()
                .unwrap()
                .insert(code.to_string(), url.to_string());
            cache
        }

        fn cached(&self, code: &str) -> Option<String> {
            self.entries.lock().unwrap().get(code).cloned()
        }

        fn evictions(&self) -> Vec<String> {
            self.evicted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CacheService for SpyCache {
        async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(short_code).cloned())
        }

        async fn set_url(
            &self,
            short_code: &str,
            original_url: &str,
            _ttl_seconds: Option<usize>,
        ) -> CacheResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(short_code.to_string(), original_url.to_string());
            Ok(())
        }

        async fn evict(&self, short_code: &str) -> CacheResult<()> {
            self.entries.lock().unwrap().remove(short_code);
            self.evicted.lock().unwrap().push(short_code.to_string());
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn service_with(store: MockLinkRepository, cache: Arc<dyn CacheService>) -> LinkService {
        LinkService::new(Arc::new(store), cache, 6)
    }

    fn expect_sweep(store: &mut MockLinkRepository) {
        store.expect_sweep_expired().returning(|_| Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_create_generates_code_and_primes_cache() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_insert().times(1).returning(|_| Ok(()));

        let cache = Arc::new(SpyCache::default());
        let service = LinkService::new(Arc::new(store), cache.clone(), 6);

        let record = service
            .create("https://Example.com/page#frag".to_string(), None, None)
            .await
            .unwrap();

        assert_eq!(record.short_code.len(), 6);
        assert_eq!(record.original_url, "https://example.com/page");
        assert_eq!(record.clicks, 0);
        assert_eq!(
            cache.cached(&record.short_code).as_deref(),
            Some("https://example.com/page")
        );
    }

    #[tokio::test]
    async fn test_create_with_custom_alias() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store
            .expect_insert()
            .withf(|record| record.short_code == "promo")
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(store, Arc::new(NullCache));

        let record = service
            .create(
                "https://example.com/".to_string(),
                Some("promo".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(record.short_code, "promo");
    }

    #[tokio::test]
    async fn test_create_custom_alias_conflict() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_insert().times(1).returning(|record| {
            Err(AppError::code_in_use(
                "Short code already in use",
                json!({ "code": record.short_code }),
            ))
        });

        let service = service_with(store, Arc::new(NullCache));

        let result = service
            .create(
                "https://example.com/".to_string(),
                Some("taken".to_string()),
                None,
            )
            .await;

        assert!(matches!(result, Err(AppError::CodeInUse { .. })));
    }

    #[tokio::test]
    async fn test_create_retries_generated_collisions() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);

        let mut attempts = 0;
        store.expect_insert().times(3).returning(move |record| {
            attempts += 1;
            if attempts < 3 {
                Err(AppError::code_in_use(
                    "Short code already in use",
                    json!({ "code": record.short_code }),
                ))
            } else {
                Ok(())
            }
        });

        let service = service_with(store, Arc::new(NullCache));

        let result = service
            .create("https://example.com/".to_string(), None, None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_gives_up_after_too_many_collisions() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store
            .expect_insert()
            .times(MAX_GENERATE_ATTEMPTS)
            .returning(|record| {
                Err(AppError::code_in_use(
                    "Short code already in use",
                    json!({ "code": record.short_code }),
                ))
            });

        let service = service_with(store, Arc::new(NullCache));

        let result = service
            .create("https://example.com/".to_string(), None, None)
            .await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_insert().times(0);

        let service = service_with(store, Arc::new(NullCache));

        let result = service.create("not-a-url".to_string(), None, None).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_cache_hit_never_touches_store() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        // No find / record_visit expectations: any store lookup would panic.

        let cache = Arc::new(SpyCache::preloaded("abc123", "https://example.com/"));
        let service = LinkService::new(Arc::new(store), cache, 6);

        let url = service.resolve("abc123").await.unwrap();
        assert_eq!(url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_miss_counts_click_and_refreshes_cache() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);

        store.expect_find().times(1).returning(|code| {
            Ok(Some(LinkRecord::new(
                code.to_string(),
                "https://example.com/".to_string(),
                None,
            )))
        });
        store.expect_record_visit().times(1).returning(|code, at| {
            let mut record = LinkRecord::new(
                code.to_string(),
                "https://example.com/".to_string(),
                None,
            );
            record.clicks = 1;
            record.last_used = Some(at);
            Ok(Some(record))
        });

        let cache = Arc::new(SpyCache::default());
        let service = LinkService::new(Arc::new(store), cache.clone(), 6);

        let url = service.resolve("abc123").await.unwrap();
        assert_eq!(url, "https://example.com/");
        assert_eq!(cache.cached("abc123").as_deref(), Some("https://example.com/"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_find().returning(|_| Ok(None));

        let service = service_with(store, Arc::new(NullCache));

        let result = service.resolve("nosuch").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_expired_archives_and_evicts() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);

        store.expect_find().times(1).returning(|code| {
            Ok(Some(LinkRecord::new(
                code.to_string(),
                "https://example.com/".to_string(),
                Some(Utc::now() - chrono::Duration::seconds(1)),
            )))
        });
        store
            .expect_archive()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));
        store.expect_record_visit().times(0);

        let cache = Arc::new(SpyCache::preloaded("zzz999", "https://other.com/"));
        let service = LinkService::new(Arc::new(store), cache.clone(), 6);

        let result = service.resolve("abc123").await;
        assert!(matches!(result, Err(AppError::Expired { .. })));
        assert_eq!(cache.evictions(), vec!["abc123".to_string()]);
    }

    #[tokio::test]
    async fn test_stats_returns_stored_record() {
        let created_at = Utc::now() - chrono::Duration::days(3);

        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_find().times(1).returning(move |code| {
            let mut record = LinkRecord::new(
                code.to_string(),
                "https://example.com/".to_string(),
                None,
            );
            record.created_at = created_at;
            record.clicks = 7;
            Ok(Some(record))
        });

        let service = service_with(store, Arc::new(NullCache));

        let record = service.stats("abc123").await.unwrap();
        // The stored creation time is reported, not the current wall clock.
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.clicks, 7);
    }

    #[tokio::test]
    async fn test_update_refreshes_cache() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store
            .expect_update_url()
            .withf(|code, url| code == "abc123" && url == "https://new.com/")
            .times(1)
            .returning(|_, _| Ok(true));
        store.expect_find().returning(|code| {
            Ok(Some(LinkRecord::new(
                code.to_string(),
                "https://new.com/".to_string(),
                None,
            )))
        });

        let cache = Arc::new(SpyCache::preloaded("abc123", "https://old.com/"));
        let service = LinkService::new(Arc::new(store), cache.clone(), 6);

        service
            .update("abc123", "https://new.com/".to_string())
            .await
            .unwrap();

        assert_eq!(cache.cached("abc123").as_deref(), Some("https://new.com/"));
    }

    #[tokio::test]
    async fn test_update_unknown_code() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_update_url().returning(|_, _| Ok(false));

        let service = service_with(store, Arc::new(NullCache));

        let result = service.update("nosuch", "https://new.com/".to_string()).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_evicts_cache() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_remove().times(1).returning(|_| Ok(true));

        let cache = Arc::new(SpyCache::preloaded("abc123", "https://example.com/"));
        let service = LinkService::new(Arc::new(store), cache.clone(), 6);

        service.delete("abc123").await.unwrap();
        assert!(cache.cached("abc123").is_none());
        assert_eq!(cache.evictions(), vec!["abc123".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_unknown_code() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_remove().returning(|_| Ok(false));

        let service = service_with(store, Arc::new(NullCache));

        let result = service.delete("nosuch").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_normalizes_before_lookup() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store
            .expect_find_by_url()
            .withf(|url| url == "https://example.com/page")
            .times(1)
            .returning(|_| Ok(Some("abc123".to_string())));

        let service = service_with(store, Arc::new(NullCache));

        let code = service
            .search_by_url("https://EXAMPLE.com:443/page#top")
            .await
            .unwrap();
        assert_eq!(code, "abc123");
    }

    #[tokio::test]
    async fn test_search_unregistered_url() {
        let mut store = MockLinkRepository::new();
        expect_sweep(&mut store);
        store.expect_find_by_url().returning(|_| Ok(None));

        let service = service_with(store, Arc::new(NullCache));

        let result = service.search_by_url("https://nowhere.com/").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
