//! Shared application state for HTTP handlers.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AuthService, BookmarkService, RedirectService};
use crate::domain::session::SessionStore;
use crate::infrastructure::persistence::{PgBookmarkRepository, PgUserRepository};

/// State injected into every handler.
///
/// Cloned per request; everything heavy sits behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub bookmark_service: Arc<BookmarkService<PgBookmarkRepository>>,
    pub redirect_service: Arc<RedirectService<PgBookmarkRepository>>,
    pub session_store: Arc<dyn SessionStore>,
    pub pool: Arc<PgPool>,
    /// Public origin used to build `short_url`, without a trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires repositories and services around an existing pool and session store.
    pub fn new(
        pool: Arc<PgPool>,
        session_store: Arc<dyn SessionStore>,
        base_url: impl Into<String>,
        session_ttl: Duration,
    ) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let bookmark_repository = Arc::new(PgBookmarkRepository::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repository,
            session_store.clone(),
            session_ttl,
        ));
        let bookmark_service = Arc::new(BookmarkService::new(bookmark_repository));
        let redirect_service = Arc::new(RedirectService::new(bookmark_service.clone()));

        Self {
            auth_service,
            bookmark_service,
            redirect_service,
            session_store,
            pool,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}
