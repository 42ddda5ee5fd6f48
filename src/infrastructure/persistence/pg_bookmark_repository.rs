//! PostgreSQL implementation of bookmark repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Bookmark, BookmarkTotals, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use crate::utils::db_error::{SHORT_CODE_CONSTRAINT, is_unique_violation_on};
use serde_json::json;

/// PostgreSQL repository for bookmark storage and visit counting.
///
/// Visit counts are incremented in a single `UPDATE` so concurrent redirects
/// to the same code never lose updates.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookmarkRow {
    id: Uuid,
    original_url: String,
    short_code: String,
    visit_count: i32,
    created_at: DateTime<Utc>,
    user_id: Uuid,
}

impl From<BookmarkRow> for Bookmark {
    fn from(r: BookmarkRow) -> Self {
        Bookmark::new(
            r.id,
            r.original_url,
            r.short_code,
            r.visit_count,
            r.created_at,
            r.user_id,
        )
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            INSERT INTO bookmarks (id, original_url, short_code, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, original_url, short_code, visit_count, created_at, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_bookmark.original_url)
        .bind(&new_bookmark.short_code)
        .bind(new_bookmark.user_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, SHORT_CODE_CONSTRAINT) {
                AppError::conflict(
                    "Short code already exists",
                    json!({ "short_code": new_bookmark.short_code }),
                )
            } else {
                e.into()
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Bookmark>, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, original_url, short_code, visit_count, created_at, user_id
            FROM bookmarks
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Bookmark::from))
    }

    async fn increment_visits(&self, code: &str) -> Result<Option<i32>, AppError> {
        let count: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE bookmarks
            SET visit_count = visit_count + 1
            WHERE short_code = $1
            RETURNING visit_count
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, original_url, short_code, visit_count, created_at, user_id
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Bookmark>, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, original_url, short_code, visit_count, created_at, user_id
            FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Bookmark::from))
    }

    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn totals(&self) -> Result<BookmarkTotals, AppError> {
        let (bookmarks, visits): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(visit_count), 0)::BIGINT
            FROM bookmarks
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(BookmarkTotals { bookmarks, visits })
    }
}
