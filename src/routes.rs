//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health/status`   - Liveness probe (public)
//! - `GET  /health`          - Health check: DB and session store (public)
//! - `/auth/*`               - Register, login, logout (public), `me` (session)
//! - `/bookmarks*`           - Bookmark management (session required)
//! - `GET  /{short_code}`    - Redirect (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Session id from Bearer header or cookie
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, status_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
pub fn router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health/status", get(status_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::public_routes())
        .merge(protected)
        .route("/{short_code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
