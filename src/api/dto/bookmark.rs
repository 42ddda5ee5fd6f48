//! DTOs for bookmark endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::services::bookmark_service::is_redirect_safe;
use crate::domain::entities::Bookmark;

/// Request to save a URL under a new short code.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookmarkRequest {
    /// Target URL (absolute http/https). Also accepted as `url`.
    #[serde(alias = "url")]
    #[validate(
        url(message = "Invalid URL format"),
        custom(function = "redirect_safe")
    )]
    pub original_url: String,
}

fn redirect_safe(url: &str) -> Result<(), ValidationError> {
    if is_redirect_safe(url) {
        return Ok(());
    }

    let mut error = ValidationError::new("redirect_safe");
    error.message = Some("URL must not contain control characters or surrounding whitespace".into());
    Err(error)
}

/// Bookmark as returned by the API.
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub visit_count: i32,
    pub created_at: DateTime<Utc>,
}

impl BookmarkResponse {
    /// Builds the response, pointing `short_url` at `base_url`.
    pub fn new(bookmark: Bookmark, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), bookmark.short_code);

        Self {
            id: bookmark.id,
            short_code: bookmark.short_code,
            original_url: bookmark.original_url,
            short_url,
            visit_count: bookmark.visit_count,
            created_at: bookmark.created_at,
        }
    }
}

/// Caller's bookmarks, newest first.
#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub total: usize,
    pub items: Vec<BookmarkResponse>,
}
