//! Repository trait definitions for the domain layer.
//!
//! These traits abstract relational data access following the Repository
//! pattern. Concrete implementations live in `crate::infrastructure::persistence`
//! and mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage and lookup
//! - [`BookmarkRepository`] - Bookmark CRUD and visit counting
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod bookmark_repository;
pub mod user_repository;

pub use bookmark_repository::BookmarkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
