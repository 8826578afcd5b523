//! # linkstash
//!
//! An in-memory URL shortener with link expiry, usage tracking and a Redis
//! read cache, built with Axum.
//!
//! ## Architecture
//!
//! The crate follows a layered structure:
//!
//! - **Domain Layer** ([`domain`]) - Link entity and the store trait
//! - **Application Layer** ([`application`]) - [`application::services::LinkService`] orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store and Redis cache
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Design Highlights
//!
//! - **Cache-aside reads**: the cache is consulted before the store and is
//!   never the source of truth; any cache failure degrades to a store lookup
//! - **Lazy expiration**: expired links are swept into an archive at the
//!   start of every operation, not by a background task
//! - **Collision-checked codes**: generated codes retry against the active
//!   table; custom aliases may reclaim retired codes
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: enable the read cache
//! export REDIS_URL="redis://localhost:6379"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`]. See [`config`]
//! for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::LinkRecord;
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, NullCache};
    pub use crate::infrastructure::persistence::MemoryLinkStore;
    pub use crate::state::AppState;
}
