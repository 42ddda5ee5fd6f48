//! Core domain entities representing the persisted data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! structs (`NewUser`, `NewBookmark`) so that server-assigned fields such as
//! identifiers and timestamps never come from callers.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account (`users` table)
//! - [`Bookmark`] - A short code to URL mapping (`bookmarks` table)

pub mod bookmark;
pub mod user;

pub use bookmark::{Bookmark, BookmarkTotals, NewBookmark};
pub use user::{NewUser, User, normalize_email};
