//! Repository trait for bookmark data access.

use crate::domain::entities::{Bookmark, BookmarkTotals, NewBookmark};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for bookmarks and their short codes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookmarkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_bookmark.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Creates a new bookmark with `visit_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError>;

    /// Finds a bookmark by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Bookmark>, AppError>;

    /// Atomically increments the visit counter of a bookmark.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(count))` with the new counter value
    /// - `Ok(None)` if no bookmark has this code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_visits(&self, code: &str) -> Result<Option<i32>, AppError>;

    /// Lists bookmarks authored by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError>;

    /// Finds a bookmark by identifier, restricted to its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Bookmark>, AppError>;

    /// Deletes a bookmark, restricted to its author.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError>;

    /// Returns bookmark and visit totals across all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn totals(&self) -> Result<BookmarkTotals, AppError>;
}
