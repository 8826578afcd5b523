#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use chrono::{DateTime, Duration, Utc};
use linkstash::api::handlers::{
    delete_link_handler, resolve_handler, search_handler, shorten_handler, stats_handler,
    update_link_handler,
};
use linkstash::domain::entities::LinkRecord;
use linkstash::domain::repositories::LinkRepository;
use linkstash::infrastructure::cache::{CacheService, NullCache};
use linkstash::infrastructure::persistence::MemoryLinkStore;
use linkstash::state::AppState;

/// Builds an AppState over a fresh in-memory store and NullCache, returning
/// the concrete store handle for direct seeding and inspection.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    create_test_state_with_cache(Arc::new(NullCache))
}

/// Same as [`create_test_state`] but with a caller-supplied cache.
pub fn create_test_state_with_cache(
    cache: Arc<dyn CacheService>,
) -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let state = AppState::new(store.clone(), cache, 6);
    (state, store)
}

/// Router exposing the full link API plus health, mirroring production paths.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/links/shorten", post(shorten_handler))
        .route("/links/search", get(search_handler))
        .route(
            "/links/{code}",
            get(resolve_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{code}/stats", get(stats_handler))
        .with_state(state)
}

pub async fn create_test_link(store: &MemoryLinkStore, code: &str, url: &str) {
    store
        .insert(LinkRecord::new(code.to_string(), url.to_string(), None))
        .await
        .unwrap();
}

pub async fn create_expiring_link(
    store: &MemoryLinkStore,
    code: &str,
    url: &str,
    expires_at: DateTime<Utc>,
) {
    store
        .insert(LinkRecord::new(
            code.to_string(),
            url.to_string(),
            Some(expires_at),
        ))
        .await
        .unwrap();
}

pub async fn create_expired_link(store: &MemoryLinkStore, code: &str, url: &str) {
    create_expiring_link(store, code, url, Utc::now() - Duration::hours(1)).await;
}
