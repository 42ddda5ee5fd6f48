//! Bookmark entity representing a short code to URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A saved URL reachable through its short code.
///
/// `user_id` records authorship only. `visit_count` never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub visit_count: i32,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl Bookmark {
    /// Creates a new Bookmark instance.
    pub fn new(
        id: Uuid,
        original_url: String,
        short_code: String,
        visit_count: i32,
        created_at: DateTime<Utc>,
        user_id: Uuid,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            visit_count,
            created_at,
            user_id,
        }
    }

    /// Returns true if `user_id` authored this bookmark.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new bookmark.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub original_url: String,
    pub short_code: String,
    pub user_id: Uuid,
}

/// Aggregate figures over all bookmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BookmarkTotals {
    pub bookmarks: i64,
    pub visits: i64,
}
