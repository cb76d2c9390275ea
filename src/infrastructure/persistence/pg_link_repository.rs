//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default upper bound for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

const LINK_COLUMNS: &str = "id, code, url, clicks, last_clicked, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    url: String,
    clicks: i64,
    last_clicked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            code: row.code,
            url: row.url,
            clicks: row.clicks,
            last_clicked: row.last_clicked,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for link storage.
///
/// Each call is bounded by `timeout`; when it elapses the call fails with
/// [`AppError::Store`] and may be retried.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        Ok(tokio::time::timeout(self.timeout, fut).await??)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (code, url) VALUES ($1, $2) RETURNING {LINK_COLUMNS}"
        );
        let row = self
            .bounded(
                sqlx::query_as::<_, LinkRow>(&sql)
                    .bind(&new_link.code)
                    .bind(&new_link.url)
                    .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");
        let row = self
            .bounded(
                sqlx::query_as::<_, LinkRow>(&sql)
                    .bind(code)
                    .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(Link::from))
    }

    async fn record_visit(&self, code: &str) -> Result<Option<String>, AppError> {
        self.bounded(
            sqlx::query_scalar::<_, String>(
                r#"
                UPDATE links
                SET clicks = clicks + 1,
                    last_clicked = GREATEST(now(), created_at)
                WHERE code = $1
                RETURNING url
                "#,
            )
            .bind(code)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC");
        let rows = self
            .bounded(sqlx::query_as::<_, LinkRow>(&sql).fetch_all(self.pool.as_ref()))
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM links WHERE code = $1")
                    .bind(code)
                    .execute(self.pool.as_ref()),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.bounded(sqlx::query("SELECT 1").execute(self.pool.as_ref()))
            .await
            .map(|_| ())
    }
}
