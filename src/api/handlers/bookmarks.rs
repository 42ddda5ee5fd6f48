//! Handlers for the caller's bookmarks.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::bookmark::{BookmarkListResponse, BookmarkResponse, CreateBookmarkRequest};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Saves a URL and assigns it a short code.
///
/// # Endpoint
///
/// `POST /bookmarks` (session required)
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/article" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "7d1c...",
///   "short_code": "Xk3_a9Qm2LpZ",
///   "original_url": "https://example.com/article",
///   "short_url": "http://localhost:3000/Xk3_a9Qm2LpZ",
///   "visit_count": 0,
///   "created_at": "2024-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the URL is invalid and 503 if no free short code was found.
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let bookmark = state
        .bookmark_service
        .create(&payload.original_url, user.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookmarkResponse::new(bookmark, &state.base_url)),
    ))
}

/// Lists the caller's bookmarks, newest first.
///
/// `GET /bookmarks`
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<BookmarkListResponse>, AppError> {
    let items: Vec<BookmarkResponse> = state
        .bookmark_service
        .list_for_user(user.id)
        .await?
        .into_iter()
        .map(|b| BookmarkResponse::new(b, &state.base_url))
        .collect();

    Ok(Json(BookmarkListResponse {
        total: items.len(),
        items,
    }))
}

/// Returns one of the caller's bookmarks.
///
/// `GET /bookmarks/{id}`. Bookmarks of other users are reported as 404.
pub async fn get_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let id = parse_id(&id)?;

    let bookmark = state.bookmark_service.get_for_user(id, user.id).await?;

    Ok(Json(BookmarkResponse::new(bookmark, &state.base_url)))
}

/// Deletes one of the caller's bookmarks.
///
/// `DELETE /bookmarks/{id}` returns 204, or 404 if absent or not owned.
pub async fn delete_bookmark_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;

    state.bookmark_service.delete_for_user(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// A malformed id cannot name an existing bookmark.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::not_found("Bookmark not found", json!({ "id": raw })))
}
