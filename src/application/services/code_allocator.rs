//! Short code allocation.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Maximum number of random candidates tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Picks a short code that is free at the time of the check.
///
/// Allocation never writes. The unique constraint enforced by
/// [`LinkRepository::create`] remains the authority, so a code returned here
/// can still lose a race against a concurrent insert.
pub struct CodeAllocator<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> CodeAllocator<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_max_attempts(link_repository, MAX_ALLOCATION_ATTEMPTS)
    }

    pub fn with_max_attempts(link_repository: Arc<L>, max_attempts: usize) -> Self {
        Self {
            link_repository,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns a code that is not in the store.
    ///
    /// - With a requested code: validates it and checks it is free.
    /// - Without one: generates random candidates until one is free.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCode`] if the requested code is malformed (no store access)
    /// - [`AppError::CodeConflict`] if the requested code is taken
    /// - [`AppError::AllocationExhausted`] if every generated candidate collided
    /// - [`AppError::Store`] on storage failures
    pub async fn allocate(&self, requested: Option<&str>) -> Result<String, AppError> {
        match requested_code(requested) {
            Some(code) => self.reserve_custom(code).await,
            None => self.generate_unique().await,
        }
    }

    async fn reserve_custom(&self, code: &str) -> Result<String, AppError> {
        validate_custom_code(code)?;

        if self.link_repository.find_by_code(code).await?.is_some() {
            return Err(AppError::CodeConflict);
        }

        Ok(code.to_string())
    }

    async fn generate_unique(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = generate_code();

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::debug!(attempt, code, "Generated code collided");
        }

        tracing::warn!(
            attempts = self.max_attempts,
            "Failed to generate a unique code"
        );
        Err(AppError::AllocationExhausted)
    }
}

/// Trims a user-supplied code; blank input means "no custom code".
pub fn requested_code(requested: Option<&str>) -> Option<&str> {
    requested.map(str::trim).filter(|c| !c.is_empty())
}
