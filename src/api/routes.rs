//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, health_handler,
    list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`         - Create a short link
/// - `GET    /links`         - List all links, newest first
/// - `GET    /links/{code}`  - One link with click statistics
/// - `DELETE /links/{code}`  - Delete a link
/// - `GET    /health`        - Link store reachability
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/health", get(health_handler))
}
