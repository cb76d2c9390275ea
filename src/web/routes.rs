//! Web dashboard route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_link_form_handler, dashboard_handler, delete_link_form_handler, stats_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Browser-facing pages.
///
/// # Endpoints
///
/// - `GET  /`                               - Dashboard with search, filter and sort
/// - `POST /dashboard/links`                - Create form submission
/// - `POST /dashboard/links/{code}/delete`  - Delete button
/// - `GET  /code/{code}`                    - Statistics page for one link
///
/// None of these paths can be mistaken for a short code.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/dashboard/links", post(create_link_form_handler))
        .route(
            "/dashboard/links/{code}/delete",
            post(delete_link_form_handler),
        )
        .route("/code/{code}", get(stats_handler))
}
