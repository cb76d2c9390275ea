//! Link deletion from the dashboard.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{error_page, not_found_page};

/// Deletes a link and returns to the dashboard.
///
/// # Endpoint
///
/// `POST /dashboard/links/{code}/delete`
///
/// Browsers cannot send `DELETE` from a plain form, hence the POST route.
/// Unknown codes render the 404 page.
pub async fn delete_link_form_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.link_service.delete_link(&code).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(AppError::NotFound) => not_found_page(Some(&code)),
        Err(e) => error_page(&e),
    }
}
