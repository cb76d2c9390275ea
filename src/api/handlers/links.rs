//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::link::{CreateLinkRequest, DeleteResponse};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path", "code": "promo24" }
/// ```
///
/// `code` is optional; a random 8-character code is generated when absent.
///
/// # Response
///
/// `201 Created` with the full record:
///
/// ```json
/// {
///   "id": 1,
///   "code": "promo24",
///   "url": "https://example.com/some/long/path",
///   "clicks": 0,
///   "lastClicked": null,
///   "createdAt": "2025-01-05T10:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400` - URL missing or invalid, code malformed, body not JSON
/// - `409` - code already exists
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected create request body");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request body" })),
            )
                .into_response());
        }
    };

    let link = state
        .link_service
        .create_link(payload.url.as_deref(), payload.code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link)).into_response())
}

/// Lists every link, most recently created first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(State(state): State<AppState>) -> Result<Json<Vec<Link>>, AppError> {
    Ok(Json(state.link_service.list_links().await?))
}

/// Returns one link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns `404 {"error":"Not found"}` if the code is unknown.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Link>, AppError> {
    Ok(Json(state.link_service.get_link(&code).await?))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns `404 {"error":"Not found"}` if the code is unknown.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteResponse { success: true }))
}
