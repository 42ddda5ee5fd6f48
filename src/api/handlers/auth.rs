//! Handlers for account registration, login, logout and the current user.

use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::api::middleware::auth::{CurrentUser, SESSION_COOKIE, session_id_from_parts};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new account.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "password": "pw1" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: account created, body is the public user view
/// - **400 Bad Request**: malformed email or password
/// - **409 Conflict**: email already registered
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Opens a session for valid credentials.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Response
///
/// `200 OK` with `{"session_id": "..."}` and a matching `session_id` cookie
/// (`HttpOnly`, `SameSite=Lax`, `Max-Age` equal to the session TTL).
///
/// Unknown email, wrong password and inactive account all yield the same
/// `401 invalid_credentials` body.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let session_id = state
        .auth_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let cookie = format!(
        "{SESSION_COOKIE}={session_id}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        state.auth_service.session_ttl().as_secs()
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { session_id }),
    ))
}

/// Ends the caller's session, if any, and clears the cookie.
///
/// # Endpoint
///
/// `POST /auth/logout`
///
/// Always `204 No Content` unless the session store is unreachable.
pub async fn logout_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<impl IntoResponse, AppError> {
    let (mut parts, _body) = req.into_parts();

    if let Some(session_id) = session_id_from_parts(&mut parts).await {
        state.auth_service.logout(&session_id).await?;
    }

    let cookie = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /auth/me` (session required)
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
