//! DTOs for link endpoints.
//!
//! Created and fetched links are returned as [`crate::domain::entities::Link`]
//! directly; its serialization is the wire format.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/links`.
///
/// Both fields are optional at the wire level so that a missing `url` is
/// reported as "URL is required" rather than as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,

    /// Optional custom short code; blank means "generate one".
    #[serde(default)]
    pub code: Option<String>,
}

/// Body returned by `DELETE /api/links/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
