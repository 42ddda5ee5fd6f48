mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@x.com", "pw1").await;
    common::create_test_bookmark(&pool, "redirect1", "https://example.com/target", user_id).await;
    let server = common::make_server(pool);

    let response = server.get("/redirect1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_redirect_malformed_code(pool: PgPool) {
    let server = common::make_server(pool);

    server
        .get("/this-code-is-far-too-long-to-exist")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_needs_no_session(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@x.com", "pw1").await;
    common::create_test_bookmark(&pool, "open1", "https://example.com", user_id).await;
    let server = common::make_server(pool);

    server
        .get("/open1")
        .add_header("Authorization", "Bearer garbage")
        .await
        .assert_status(StatusCode::FOUND);
}

#[sqlx::test]
async fn test_redirect_counts_every_visit(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@x.com", "pw1").await;
    common::create_test_bookmark(&pool, "count1", "https://example.com", user_id).await;
    let server = common::make_server(pool.clone());

    for expected in 1..=3 {
        server.get("/count1").await.assert_status(StatusCode::FOUND);
        assert_eq!(common::visit_count(&pool, "count1").await, expected);
    }
}

#[sqlx::test]
async fn test_failed_redirect_counts_nothing(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "a@x.com", "pw1").await;
    common::create_test_bookmark(&pool, "quiet1", "https://example.com", user_id).await;
    let server = common::make_server(pool.clone());

    server.get("/quiet2").await.assert_status_not_found();

    assert_eq!(common::visit_count(&pool, "quiet1").await, 0);
}

/// register → login → bookmark → redirect twice, checking the counter.
#[sqlx::test]
async fn test_end_to_end_scenario(pool: PgPool) {
    let server = common::make_server(pool.clone());

    let registered = server
        .post("/auth/register")
        .json(&json!({ "email": "a@x.com", "password": "pw1" }))
        .await;
    registered.assert_status(StatusCode::CREATED);
    let user_id: uuid::Uuid = registered.json::<Value>()["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let session_id = common::login(&server, "a@x.com", "pw1").await;
    server
        .get("/auth/me")
        .add_header("Authorization", common::bearer(&session_id))
        .await
        .assert_status_ok();

    common::create_test_bookmark(&pool, "c1", "https://example.com", user_id).await;

    let first = server.get("/c1").await;
    first.assert_status(StatusCode::FOUND);
    assert_eq!(first.header("location"), "https://example.com");
    assert_eq!(common::visit_count(&pool, "c1").await, 1);

    server.get("/c1").await.assert_status(StatusCode::FOUND);
    assert_eq!(common::visit_count(&pool, "c1").await, 2);

    server.get("/doesnotexist").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_created_bookmark_redirects(pool: PgPool) {
    common::create_test_user(&pool, "a@x.com", "pw1").await;
    let server = common::make_server(pool);
    let session_id = common::login(&server, "a@x.com", "pw1").await;

    let created = server
        .post("/bookmarks")
        .add_header("Authorization", common::bearer(&session_id))
        .json(&json!({ "original_url": "https://example.com/deep/link" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let code = created.json::<Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/deep/link");
}
