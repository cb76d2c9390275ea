//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{error_page, not_found_page};

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that can never exist without touching the store
/// 2. Count the visit and fetch the URL in one store operation
/// 3. Return 307 Temporary Redirect
///
/// The redirect is temporary so browsers keep asking, and every follow-up
/// visit is counted.
///
/// # Errors
///
/// Unknown codes get the HTML "not found" page with status 404; store
/// failures get the HTML error page with status 500.
pub async fn redirect_handler(Path(code): Path<String>, State(state): State<AppState>) -> Response {
    match state.redirect_service.resolve(&code).await {
        Ok(url) => {
            debug!(code = %code, "Redirecting");
            Redirect::temporary(&url).into_response()
        }
        Err(AppError::NotFound) => not_found_page(Some(&code)),
        Err(e) => {
            error!(code = %code, error = %e, "Redirect failed");
            error_page(&e)
        }
    }
}
