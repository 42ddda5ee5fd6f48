//! Session authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "session_id";

/// The user a request was authenticated as.
///
/// Inserted into request extensions by [`layer`]; handlers read it with
/// `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticates requests by session identifier.
///
/// # Session Transport
///
/// ```text
/// Authorization: Bearer <session_id>
/// Cookie: session_id=<session_id>
/// ```
///
/// The header wins when both are present.
///
/// # Authentication Flow
///
/// 1. Extract the session id from the header or cookie
/// 2. Resolve it to an active user (refreshing the session's expiry)
/// 3. Attach [`CurrentUser`] to the request
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if no session id
/// is supplied or it does not resolve. Returns `500` if the session store is
/// unreachable.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/bookmarks", get(list_bookmarks_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let session_id = session_id_from_parts(&mut parts)
        .await
        .ok_or_else(|| AppError::unauthenticated("Session id is missing"))?;

    let user = st.auth_service.resolve_session(&session_id).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Reads the session id from a Bearer header, falling back to the cookie.
pub async fn session_id_from_parts(parts: &mut Parts) -> Option<String> {
    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(parts, &()).await
        && !token.is_empty()
    {
        return Some(token);
    }

    parts
        .headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut pair = cookie.trim().splitn(2, '=');
                match (pair.next(), pair.next()) {
                    (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}
