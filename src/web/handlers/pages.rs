//! Shared HTML error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// "Link not found" page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    /// Empty when the request did not name a code.
    pub code: String,
}

/// Generic failure page for errors the user cannot fix by editing input.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

/// Renders the HTML 404 page.
pub fn not_found_page(code: Option<&str>) -> Response {
    let page = NotFoundTemplate {
        code: code.unwrap_or_default().to_string(),
    };
    (StatusCode::NOT_FOUND, page).into_response()
}

/// Renders `err` as an HTML page with the matching status.
///
/// Internal failures only show the public message.
pub fn error_page(err: &AppError) -> Response {
    if matches!(err, AppError::NotFound) {
        return not_found_page(None);
    }

    let status = err.status_code();
    let page = ErrorTemplate {
        status: status.as_u16(),
        message: err.public_message(),
    };
    (status, page).into_response()
}

/// Fallback for paths no route matches.
pub async fn fallback_handler() -> Response {
    not_found_page(None)
}
