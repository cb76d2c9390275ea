#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::repositories::LinkRepository;
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::MemoryLinkRepository;
use tinylink::routes::router;
use tinylink::state::AppState;

pub const BASE_URL: &str = "https://tiny.link";

/// Server over a fresh in-memory store, plus a handle on that store.
pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), BASE_URL);
    (TestServer::new(router(state)).unwrap(), repo)
}

pub fn create_server_with(repo: Arc<dyn LinkRepository>) -> TestServer {
    TestServer::new(router(AppState::new(repo, BASE_URL))).unwrap()
}

/// Creates a link through the API and returns its JSON record.
pub async fn create_link(server: &TestServer, url: &str, code: Option<&str>) -> Value {
    let body = match code {
        Some(code) => json!({ "url": url, "code": code }),
        None => json!({ "url": url }),
    };

    let response = server.post("/api/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Link store whose every call fails like an unreachable database.
pub struct UnavailableLinkRepository;

fn unavailable() -> AppError {
    AppError::Store("connection refused".to_string())
}

#[async_trait]
impl LinkRepository for UnavailableLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn record_visit(&self, _code: &str) -> Result<Option<String>, AppError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}
