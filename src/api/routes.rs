//! API route configuration.
//!
//! Routes here fall into two groups: public account endpoints and endpoints
//! that require a session via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler, login_handler, logout_handler, me_handler, register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Account endpoints reachable without a session.
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Open a session
/// - `POST /auth/logout`   - Close the current session (if any)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
}

/// Endpoints that need an authenticated user.
///
/// - `GET    /auth/me`         - Current user
/// - `GET    /bookmarks`       - List own bookmarks
/// - `POST   /bookmarks`       - Create a bookmark
/// - `GET    /bookmarks/{id}`  - Fetch an own bookmark
/// - `DELETE /bookmarks/{id}`  - Delete an own bookmark
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route(
            "/bookmarks",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route(
            "/bookmarks/{id}",
            get(get_bookmark_handler).delete(delete_bookmark_handler),
        )
}
