//! Link statistics page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::state::AppState;
use crate::error::AppError;
use crate::web::handlers::{error_page, not_found_page};
use crate::web::view::{format_count, format_last_clicked, is_web_url};

/// Template for the per-link statistics page.
#[derive(Template, WebTemplate)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub code: String,
    pub url: String,
    pub linkable: bool,
    pub short_url: String,
    pub clicks: String,
    /// Relative label such as "5 min ago" or "Never".
    pub last_clicked: String,
    /// Exact UTC timestamp, empty if never clicked.
    pub last_clicked_at: String,
    pub created_at: String,
}

/// Renders the statistics page for one link.
///
/// # Endpoint
///
/// `GET /code/{code}`
///
/// Viewing this page does not count as a visit.
pub async fn stats_handler(Path(code): Path<String>, State(state): State<AppState>) -> Response {
    let link = match state.link_service.get_link(&code).await {
        Ok(link) => link,
        Err(AppError::NotFound) => return not_found_page(Some(&code)),
        Err(e) => return error_page(&e),
    };

    StatsTemplate {
        linkable: is_web_url(&link.url),
        short_url: link.short_url(&state.base_url),
        clicks: format_count(link.clicks),
        last_clicked: format_last_clicked(link.last_clicked, Utc::now()),
        last_clicked_at: link
            .last_clicked
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default(),
        created_at: link.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        code: link.code,
        url: link.url,
    }
    .into_response()
}
