//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_well_formed_code;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}` (public)
///
/// # Request Flow
///
/// 1. Reject codes that cannot exist without touching the database
/// 2. Look up the bookmark
/// 3. Increment its visit counter
/// 4. Return `302 Found` with `Location: <original_url>`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_well_formed_code(&short_code) {
        return Err(AppError::not_found(
            "Bookmark not found",
            json!({ "short_code": short_code }),
        ));
    }

    let original_url = state.redirect_service.resolve(&short_code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
