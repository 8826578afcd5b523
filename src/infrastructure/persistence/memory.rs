//! In-memory implementation of the primary link store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Active and archive tables, guarded together by a single lock so that an
/// archival move can never be observed half-done.
///
/// `order` tracks insertion order of active codes; sweeps and URL searches
/// iterate it so their results are deterministic.
#[derive(Default)]
struct Tables {
    active: HashMap<String, LinkRecord>,
    archived: HashMap<String, LinkRecord>,
    order: Vec<String>,
}

impl Tables {
    fn archive_one(&mut self, code: &str) -> bool {
        match self.active.remove(code) {
            Some(record) => {
                self.order.retain(|c| c != code);
                self.archived.insert(code.to_string(), record);
                true
            }
            None => false,
        }
    }
}

/// Process-local store backed by hash tables.
///
/// This is the record of truth; the Redis layer in front of it is a
/// best-effort accelerator only. The store is not shared across processes,
/// so multiple instances behind a load balancer would each hold an
/// independent view.
#[derive(Default)]
pub struct MemoryLinkStore {
    tables: Mutex<Tables>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkStore {
    async fn insert(&self, record: LinkRecord) -> Result<(), AppError> {
        let mut tables = self.tables.lock().await;

        if tables.active.contains_key(&record.short_code) {
            return Err(AppError::code_in_use(
                "Short code already in use",
                json!({ "code": record.short_code }),
            ));
        }

        tables.order.push(record.short_code.clone());
        tables.active.insert(record.short_code.clone(), record);
        Ok(())
    }

    async fn find(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.active.get(code).cloned())
    }

    async fn record_visit(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<LinkRecord>, AppError> {
        let mut tables = self.tables.lock().await;

        Ok(tables.active.get_mut(code).map(|record| {
            record.clicks += 1;
            record.last_used = Some(at);
            record.clone()
        }))
    }

    async fn update_url(&self, code: &str, new_url: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;

        match tables.active.get_mut(code) {
            Some(record) => {
                record.original_url = new_url.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, code: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;

        let removed = tables.active.remove(code).is_some();
        if removed {
            tables.order.retain(|c| c != code);
        }
        Ok(removed)
    }

    async fn archive(&self, code: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.archive_one(code))
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let mut tables = self.tables.lock().await;

        let expired: Vec<String> = tables
            .order
            .iter()
            .filter(|code| {
                tables
                    .active
                    .get(*code)
                    .is_some_and(|r| r.is_expired_at(now))
            })
            .cloned()
            .collect();

        for code in &expired {
            tables.archive_one(code);
        }

        if !expired.is_empty() {
            debug!(count = expired.len(), "Swept expired links into archive");
        }

        Ok(expired)
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<String>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .order
            .iter()
            .find(|code| {
                tables
                    .active
                    .get(*code)
                    .is_some_and(|r| r.original_url == original_url)
            })
            .cloned())
    }

    async fn find_archived(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.archived.get(code).cloned())
    }

    async fn active_count(&self) -> Result<usize, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.active.len())
    }
}
