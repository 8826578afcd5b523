//! HTTP request handlers.

mod health;
mod links;
mod resolve;
mod search;
mod shorten;
mod stats;

pub use health::health_handler;
pub use links::{delete_link_handler, update_link_handler};
pub use resolve::resolve_handler;
pub use search::search_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
