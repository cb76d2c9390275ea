//! Link creation, listing, lookup and deletion.

use std::sync::Arc;

use crate::application::services::code_allocator::{CodeAllocator, requested_code};
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Number of inserts tried for a generated code before giving up.
///
/// An insert only fails this way when a concurrent request claimed the same
/// code between allocation and insert.
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Service boundary for link management used by the API, the dashboard and
/// the admin CLI.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    allocator: CodeAllocator<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        let allocator = CodeAllocator::new(link_repository.clone());
        Self {
            link_repository,
            allocator,
        }
    }

    /// Creates a short link.
    ///
    /// The URL is validated first, then the custom code if one is given; both
    /// checks happen before any store access. The URL is stored exactly as
    /// submitted.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is missing or not absolute
    /// - [`AppError::InvalidCode`] if the custom code is malformed
    /// - [`AppError::CodeConflict`] if the custom code is taken, including when
    ///   a concurrent request inserted it after the availability check
    /// - [`AppError::AllocationExhausted`] if no free random code was found
    /// - [`AppError::Store`] on storage failures
    pub async fn create_link(
        &self,
        url: Option<&str>,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        let url = validate_url(url)?;

        let link = match requested_code(custom_code) {
            Some(custom) => {
                let code = self.allocator.allocate(Some(custom)).await?;
                self.insert(code, url).await?
            }
            None => self.insert_generated(url).await?,
        };

        tracing::info!(code = %link.code, id = link.id, "Link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(link)
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !self.link_repository.delete(code).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(code, "Link deleted");
        Ok(())
    }

    /// Checks that the underlying store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    async fn insert(&self, code: String, url: &str) -> Result<Link, AppError> {
        self.link_repository
            .create(NewLink {
                code,
                url: url.to_string(),
            })
            .await
    }

    async fn insert_generated(&self, url: &str) -> Result<Link, AppError> {
        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let code = self.allocator.allocate(None).await?;

            match self.insert(code, url).await {
                Err(AppError::CodeConflict) => {
                    tracing::debug!(attempt, "Generated code taken concurrently, retrying");
                }
                other => return other,
            }
        }

        Err(AppError::AllocationExhausted)
    }
}
