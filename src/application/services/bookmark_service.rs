//! Bookmark creation, lookup and visit counting.

use serde_json::json;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::domain::entities::{Bookmark, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Maximum number of codes tried before giving up on a create.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for saving URLs under random short codes.
///
/// URLs are stored exactly as submitted. Two bookmarks may point at the same
/// URL; each gets its own code.
pub struct BookmarkService<R: BookmarkRepository> {
    repository: Arc<R>,
}

impl<R: BookmarkRepository> BookmarkService<R> {
    /// Creates a new bookmark service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Saves `original_url` for `user_id` under a freshly generated code.
    ///
    /// # Code Generation
    ///
    /// Each attempt draws a random 12-character code. A code taken by an
    /// existing row, either seen up front or reported by the unique constraint
    /// on insert, costs one attempt. After [`MAX_CODE_ATTEMPTS`] collisions
    /// the create fails.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute http(s) URL.
    /// Returns [`AppError::ExhaustedRetries`] if every attempt collided.
    /// Returns [`AppError::Internal`] on database errors.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, original_url: &str, user_id: Uuid) -> Result<Bookmark, AppError> {
        validate_url(original_url)?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code();

            if self.repository.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, "Short code collision on lookup");
                continue;
            }

            let new_bookmark = NewBookmark {
                original_url: original_url.to_owned(),
                short_code: code,
                user_id,
            };

            match self.repository.create(new_bookmark).await {
                Ok(bookmark) => {
                    tracing::info!(
                        bookmark_id = %bookmark.id,
                        short_code = %bookmark.short_code,
                        "Bookmark created"
                    );
                    return Ok(bookmark);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "Short code collision on insert");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(attempts = MAX_CODE_ATTEMPTS, "Could not allocate a short code");

        Err(AppError::exhausted_retries(MAX_CODE_ATTEMPTS))
    }

    /// Looks up a bookmark by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark has this code.
    pub async fn get_by_code(&self, short_code: &str) -> Result<Bookmark, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Bookmark not found", json!({ "short_code": short_code }))
            })
    }

    /// Adds one to the visit counter and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark has this code.
    pub async fn record_visit(&self, short_code: &str) -> Result<i32, AppError> {
        self.repository
            .increment_visits(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Bookmark not found", json!({ "short_code": short_code }))
            })
    }

    /// Lists bookmarks authored by `user_id`, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Bookmark>, AppError> {
        self.repository.list_by_user(user_id).await
    }

    /// Fetches one of `user_id`'s bookmarks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the bookmark is absent or authored by
    /// someone else. The two cases are indistinguishable to the caller.
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Bookmark, AppError> {
        self.repository
            .find_for_user(id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Bookmark not found", json!({ "id": id })))
    }

    /// Deletes one of `user_id`'s bookmarks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the bookmark is absent or authored by
    /// someone else.
    #[tracing::instrument(skip(self))]
    pub async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete_for_user(id, user_id).await? {
            return Err(AppError::not_found(
                "Bookmark not found",
                json!({ "id": id }),
            ));
        }

        tracing::info!(bookmark_id = %id, "Bookmark deleted");

        Ok(())
    }
}

/// Returns true if `raw` can be sent back verbatim as a `Location` header.
///
/// URL parsing quietly drops control characters and surrounding whitespace,
/// so those are rejected before the string is stored as-is.
pub fn is_redirect_safe(raw: &str) -> bool {
    raw.trim() == raw && !raw.chars().any(char::is_control)
}

/// Accepts absolute `http` and `https` URLs with a host.
fn validate_url(raw: &str) -> Result<(), AppError> {
    if !is_redirect_safe(raw) {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "URL must not contain control characters or surrounding whitespace" }),
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "Only http and https URLs are supported" }),
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "URL must include a host" }),
        ));
    }

    Ok(())
}
