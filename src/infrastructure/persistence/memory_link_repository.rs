//! In-process link store.
//!
//! Holds every record in a map behind one async lock, so each trait method is
//! atomic exactly like a single SQL statement. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    links: HashMap<String, Link>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.inner.read().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        if inner.links.contains_key(&new_link.code) {
            return Err(AppError::CodeConflict);
        }

        inner.next_id += 1;
        let link = Link::new(inner.next_id, new_link.code, new_link.url, Utc::now());
        inner.links.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.inner.read().await.links.get(code).cloned())
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut inner = self.inner.write().await;

        Ok(inner.links.get_mut(code).map(|link| {
            link.clicks += 1;
            link.last_clicked = Some(Utc::now().max(link.created_at));
            link.url.clone()
        }))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.inner.read().await.links.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.inner.write().await.links.remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
