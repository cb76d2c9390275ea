//! Resolution of short codes into destination URLs.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Turns an inbound short code into its destination while counting the visit.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Resolves `code` and records one visit.
    ///
    /// The increment and the lookup are a single store operation, so
    /// concurrent visits to the same code never lose a count. The stored URL
    /// is returned untouched.
    ///
    /// Strings that cannot be codes (`favicon.ico`, `robots.txt`) are answered
    /// with `NotFound` without touching the store.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this code; nothing is written
    /// - [`AppError::Store`] on storage failures; not retried here
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            metrics::counter!("redirects_total", "outcome" => "miss").increment(1);
            return Err(AppError::NotFound);
        }

        match self.link_repository.record_visit(code).await? {
            Some(url) => {
                tracing::debug!(code, "Redirect hit");
                metrics::counter!("redirects_total", "outcome" => "hit").increment(1);
                Ok(url)
            }
            None => {
                tracing::debug!(code, "Redirect miss");
                metrics::counter!("redirects_total", "outcome" => "miss").increment(1);
                Err(AppError::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    #[tokio::test]
    async fn test_resolve_hit_returns_stored_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_visit()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/path?x=1".to_string())));

        let service = RedirectService::new(Arc::new(repo));

        assert_eq!(
            service.resolve("abc123").await.unwrap(),
            "https://example.com/path?x=1"
        );
    }

    #[tokio::test]
    async fn test_resolve_miss_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_visit().times(1).returning(|_| Ok(None));

        let service = RedirectService::new(Arc::new(repo));

        assert!(matches!(
            service.resolve("Missing1").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_visit().times(0);

        let service = RedirectService::new(Arc::new(repo));

        for code in ["favicon.ico", "missing-code", "abc"] {
            assert!(matches!(
                service.resolve(code).await,
                Err(AppError::NotFound)
            ));
        }
    }

    #[tokio::test]
    async fn test_resolve_store_error_propagates() {
        let mut repo = MockLinkRepository::new();
        repo.expect_record_visit()
            .times(1)
            .returning(|_| Err(AppError::Store("timeout".into())));

        let service = RedirectService::new(Arc::new(repo));

        let err = service.resolve("abc123").await.unwrap_err();
        assert!(err.is_transient());
    }
}
