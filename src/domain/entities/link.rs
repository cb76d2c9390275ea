//! Link entity representing a shortened URL and its visit counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A short code mapped to a destination URL.
///
/// `code` and `url` never change after creation. Only the visit counters
/// (`clicks`, `last_clicked`) are mutated, and only by a successful redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been visited.
    pub fn new(id: i64, code: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            url,
            clicks: 0,
            last_clicked: None,
            created_at,
        }
    }

    /// Returns true once the link has been resolved at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }

    /// Builds the public short URL for this link.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.code)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}
