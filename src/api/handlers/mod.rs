//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod redirect;

pub use auth::{login_handler, logout_handler, me_handler, register_handler};
pub use bookmarks::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler,
};
pub use health::{health_handler, status_handler};
pub use redirect::redirect_handler;
