//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect
//! - `/api/*`            - JSON API
//! - `/`, `/dashboard/*`, `/code/*` - HTML pages
//!
//! Short codes are 6 to 8 alphanumeric characters, so no fixed path can
//! shadow one and vice versa.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::fallback_handler;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with state and tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::routes())
        .merge(web::routes::routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the served application: [`router`] plus trailing slash trimming.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
