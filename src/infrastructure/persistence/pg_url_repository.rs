//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_alias;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    alias: String,
    original_url: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    total_clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(
            r.id,
            r.alias,
            r.original_url,
            r.description,
            r.created_at,
            r.total_clicks,
        )
    }
}

/// PostgreSQL repository for URL records.
///
/// Every call checks a connection out of the shared pool for the duration of
/// one statement; the connection returns to the pool when the query future
/// completes or is dropped, whichever way it ends.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (alias, original_url, description)
            VALUES ($1, $2, $3)
            RETURNING id, alias, original_url, description, created_at, total_clicks
            "#,
        )
        .bind(&new_record.alias)
        .bind(&new_record.original_url)
        .bind(&new_record.description)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_alias(&e) {
                AppError::alias_conflict(&new_record.alias)
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, alias, original_url, description, created_at, total_clicks
            FROM urls
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_clicks(&self, alias: &str) -> Result<Option<i64>, AppError> {
        // Single-statement update: Postgres row locking serialises concurrent
        // increments of the same alias.
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE urls
            SET total_clicks = total_clicks + 1
            WHERE alias = $1
            RETURNING total_clicks
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(total) = total {
            debug!("Click count increased for alias: {} to {}", alias, total);
        }

        Ok(total)
    }

    async fn last_id(&self) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM urls ORDER BY id DESC LIMIT 1")
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(id)
    }
}
