//! Application error type shared by services, repositories and handlers.
//!
//! Every variant maps to exactly one HTTP status. The JSON body is always
//! `{"error": "<message>"}`; internal failures are logged and answered with a
//! generic message so store details never leak to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Name of the unique constraint guarding `links.code`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "links_code_key";

#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted URL is missing or does not parse as an absolute URL.
    #[error("{0}")]
    InvalidUrl(String),

    #[error("Code must be alphanumeric and 6–8 characters long")]
    InvalidCode,

    #[error("Code already exists")]
    CodeConflict,

    #[error("Not found")]
    NotFound,

    /// Every generated candidate collided with an existing code.
    #[error("Could not allocate a unique code")]
    AllocationExhausted,

    /// The store is unreachable, timed out or failed. Safe to retry.
    #[error("Store error: {0}")]
    Store(String),
}

impl AppError {
    pub fn url_required() -> Self {
        Self::InvalidUrl("URL is required".to_string())
    }

    pub fn invalid_url() -> Self {
        Self::InvalidUrl("Invalid URL".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) | AppError::InvalidCode => StatusCode::BAD_REQUEST,
            AppError::CodeConflict => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AllocationExhausted | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to clients.
    pub fn public_message(&self) -> String {
        match self {
            AppError::AllocationExhausted | AppError::Store(_) => {
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Returns true for failures a caller may retry unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Store(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
            && matches!(db.constraint(), Some(CODE_UNIQUE_CONSTRAINT))
        {
            return AppError::CodeConflict;
        }

        AppError::Store(e.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::Store("store call timed out".to_string())
    }
}
