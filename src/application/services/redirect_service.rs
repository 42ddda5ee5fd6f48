//! Short code resolution for redirects.

use std::sync::Arc;

use crate::application::services::BookmarkService;
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

/// Resolves short codes to their target URLs, counting each resolution.
pub struct RedirectService<R: BookmarkRepository> {
    bookmarks: Arc<BookmarkService<R>>,
}

impl<R: BookmarkRepository> RedirectService<R> {
    /// Creates a new redirect service backed by the bookmark service.
    pub fn new(bookmarks: Arc<BookmarkService<R>>) -> Self {
        Self { bookmarks }
    }

    /// Returns the stored URL for `short_code` and records one visit.
    ///
    /// The visit is counted before the URL is handed back, so a successful
    /// resolve always corresponds to exactly one increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let bookmark = self.bookmarks.get_by_code(short_code).await?;

        let visits = self.bookmarks.record_visit(short_code).await?;
        tracing::debug!(visits, "Visit recorded");

        Ok(bookmark.original_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Bookmark;
    use crate::domain::repositories::MockBookmarkRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn service(repo: MockBookmarkRepository) -> RedirectService<MockBookmarkRepository> {
        RedirectService::new(Arc::new(BookmarkService::new(Arc::new(repo))))
    }

    #[tokio::test]
    async fn test_resolve_returns_url_and_counts_visit() {
        let mut mock_repo = MockBookmarkRepository::new();
        let bookmark = Bookmark::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "c1".to_string(),
            0,
            Utc::now(),
            Uuid::new_v4(),
        );

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "c1")
            .times(1)
            .returning(move |_| Ok(Some(bookmark.clone())));
        mock_repo
            .expect_increment_visits()
            .withf(|code| code == "c1")
            .times(1)
            .returning(|_| Ok(Some(1)));

        let url = service(mock_repo).resolve("c1").await.unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_does_not_count() {
        let mut mock_repo = MockBookmarkRepository::new();

        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo.expect_increment_visits().times(0);

        let result = service(mock_repo).resolve("doesnotexist").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_deleted_between_lookup_and_count() {
        let mut mock_repo = MockBookmarkRepository::new();
        let bookmark = Bookmark::new(
            Uuid::new_v4(),
            "https://example.com".to_string(),
            "c1".to_string(),
            0,
            Utc::now(),
            Uuid::new_v4(),
        );

        mock_repo
            .expect_find_by_code()
            .returning(move |_| Ok(Some(bookmark.clone())));
        mock_repo
            .expect_increment_visits()
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve("c1").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
