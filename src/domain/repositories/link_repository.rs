//! Repository trait for link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable keyed storage for [`Link`] records, keyed by `code`.
///
/// Every method is a single atomic operation on one record; no method spans
/// several records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code is already taken. This is
    /// enforced by the store itself, regardless of any earlier existence check.
    ///
    /// Returns [`AppError::Store`] on storage failures.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments `clicks` by one and stamps `last_clicked` with the
    /// current time.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` with the stored destination if the code exists
    /// - `Ok(None)` if it does not; nothing is written in that case
    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Lists all links, most recently created first.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none existed.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
