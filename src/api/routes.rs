//! Link API route configuration.

use crate::api::handlers::{
    delete_link_handler, resolve_handler, search_handler, shorten_handler, stats_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/links`.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create a short link
/// - `GET    /search`         - Reverse lookup by original URL
/// - `GET    /{code}`         - Resolve a short code
/// - `PUT    /{code}`         - Replace the destination URL
/// - `DELETE /{code}`         - Delete a link
/// - `GET    /{code}/stats`   - Usage statistics
///
/// `/shorten` and `/search` are static segments and take precedence over
/// the `{code}` capture, so those words cannot collide with short codes
/// (the alias validator also rejects them).
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/search", get(search_handler))
        .route(
            "/{code}",
            get(resolve_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/{code}/stats", get(stats_handler))
}
