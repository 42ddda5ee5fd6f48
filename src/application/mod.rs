//! Application layer services implementing business logic.
//!
//! Services consume repository and session-store traits and give HTTP
//! handlers a small API that speaks in domain entities and [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login and session resolution
//! - [`services::bookmark_service::BookmarkService`] - Bookmark creation and visit counting
//! - [`services::redirect_service::RedirectService`] - Short code to URL resolution

pub mod services;
