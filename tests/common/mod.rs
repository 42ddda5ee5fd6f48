#![allow(dead_code)]

use axum_test::TestServer;
use bookmark_shortener::infrastructure::session::MemorySessionStore;
use bookmark_shortener::routes::router;
use bookmark_shortener::state::AppState;
use bookmark_shortener::utils::password::hash_password;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const BASE_URL: &str = "http://short.test";

pub const DEFAULT_TTL: Duration = Duration::from_secs(1440 * 60);

pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> Uuid {
    insert_user(pool, email, password, true).await
}

pub async fn create_inactive_user(pool: &PgPool, email: &str, password: &str) -> Uuid {
    insert_user(pool, email, password, false).await
}

async fn insert_user(pool: &PgPool, email: &str, password: &str, is_active: bool) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO users (id, email, hashed_password, is_active) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(email)
    .bind(hash_password(password).unwrap())
    .bind(is_active)
    .execute(pool)
    .await
    .unwrap();

    id
}

pub async fn create_test_bookmark(pool: &PgPool, code: &str, url: &str, user_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO bookmarks (id, original_url, short_code, user_id) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(url)
    .bind(code)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();

    id
}

pub async fn visit_count(pool: &PgPool, code: &str) -> i32 {
    sqlx::query_scalar("SELECT visit_count FROM bookmarks WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn deactivate_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_ttl(pool, DEFAULT_TTL)
}

pub fn create_test_state_with_ttl(pool: PgPool, session_ttl: Duration) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(MemorySessionStore::new()),
        BASE_URL,
        session_ttl,
    )
}

/// Full application router over an in-memory session store.
pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(router(create_test_state(pool))).unwrap()
}

pub fn make_server_with_state(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Logs in and returns the session id from the response body.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();

    response.json::<serde_json::Value>()["session_id"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn bearer(session_id: &str) -> String {
    format!("Bearer {session_id}")
}
