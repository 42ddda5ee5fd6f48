//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters and explicit row structs.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User account storage
//! - [`PgBookmarkRepository`] - Bookmark storage and visit counting

pub mod pg_bookmark_repository;
pub mod pg_user_repository;

pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_user_repository::PgUserRepository;
