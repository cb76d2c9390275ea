//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Cloneable handle to the services behind the HTTP surfaces.
///
/// Holds no mutable state of its own; every mutation goes through the link
/// store the services were built with.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    /// Public origin used to render short URLs, without trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Builds the services around a single link store.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: &str) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
