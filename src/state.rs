use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Shared application state injected into all handlers.
///
/// The store and cache handles are kept alongside the service so the health
/// endpoint can probe them directly.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub store: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        code_length: usize,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(store.clone(), cache.clone(), code_length));

        Self {
            link_service,
            store,
            cache,
        }
    }
}
