//! Web API Forum Tests
//!
//! Integration tests for thread and reply endpoints, including
//! authorship resolution and the reply-count invariant.

use axum::http::StatusCode;
use axum_test::TestServer;
use brasa::web::handlers::AppState;
use brasa::web::middleware::JwtState;
use brasa::web::router::create_router;
use brasa::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database.
fn create_test_server() -> (TestServer, Arc<Mutex<Database>>) {
    let db = Database::open_in_memory().expect("Failed to create test database");
    let shared_db = Arc::new(Mutex::new(db));

    let app_state = Arc::new(AppState::new(
        shared_db.clone(),
        TEST_JWT_SECRET,
        900,
        1024 * 1024,
    ));
    let jwt_state = Arc::new(JwtState::new(TEST_JWT_SECRET));

    let router = create_router(app_state, jwt_state, &[], 1024 * 1024);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, shared_db)
}

/// Register a user and return an access token.
async fn register_and_get_token(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["access_token"].as_str().unwrap().to_string()
}

/// Create a thread and return its ID.
async fn create_thread(server: &TestServer, title: &str, content: &str) -> i64 {
    let response = server
        .post("/api/threads")
        .json(&json!({
            "title": title,
            "content": content
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["id"].as_i64().unwrap()
}

// ============================================================================
// Thread Creation Tests
// ============================================================================

#[tokio::test]
async fn test_create_thread_unauthenticated_is_anonymous() {
    let (server, _db) = create_test_server();

    let response = server
        .post("/api/threads")
        .json(&json!({
            "title": "Hello world",
            "content": "First thread"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Hello world");
    assert!(body["data"]["author_username"].is_null());
    assert_eq!(body["data"]["reply_count"], 0);
}

#[tokio::test]
async fn test_create_thread_authenticated_is_attributed() {
    let (server, _db) = create_test_server();
    let token = register_and_get_token(&server, "alice").await;

    let response = server
        .post("/api/threads")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Independência Já",
            "content": "Vamos discutir"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["author_username"], "alice");
    assert_eq!(body["data"]["reply_count"], 0);
}

#[tokio::test]
async fn test_create_thread_anonymous_flag_suppresses_attribution() {
    let (server, _db) = create_test_server();
    let token = register_and_get_token(&server, "alice").await;

    // Authenticated, but explicitly anonymous
    let response = server
        .post("/api/threads")
        .authorization_bearer(&token)
        .json(&json!({
            "title": "Secret topic",
            "content": "No names here",
            "anonymous": true
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["data"]["author_username"].is_null());
}

#[tokio::test]
async fn test_create_thread_garbage_token_falls_back_to_anonymous() {
    let (server, _db) = create_test_server();

    // An unusable bearer token degrades to the unauthenticated state
    // instead of failing the request
    let response = server
        .post("/api/threads")
        .authorization_bearer("garbage")
        .json(&json!({
            "title": "Still posted",
            "content": "Token was junk"
        }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["data"]["author_username"].is_null());
}

#[tokio::test]
async fn test_create_reply_garbage_token_falls_back_to_anonymous() {
    let (server, _db) = create_test_server();

    let id = create_thread(&server, "Topic", "Body").await;

    let response = server
        .post(&format!("/api/threads/{id}/replies"))
        .authorization_bearer("not.a.token")
        .json(&json!({ "content": "Reply with junk token" }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["data"]["author_username"].is_null());
}

#[tokio::test]
async fn test_create_thread_empty_title_rejected() {
    let (server, _db) = create_test_server();

    let response = server
        .post("/api/threads")
        .json(&json!({
            "title": "",
            "content": "Content"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_thread_whitespace_title_rejected() {
    let (server, _db) = create_test_server();

    // Passes the length check but fails the trimmed-empty check
    let response = server
        .post("/api/threads")
        .json(&json!({
            "title": "   ",
            "content": "Content"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_thread_unknown_image_ref_rejected() {
    let (server, _db) = create_test_server();

    let response = server
        .post("/api/threads")
        .json(&json!({
            "title": "With image",
            "content": "Content",
            "image_ref": "does-not-exist"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    // The failed create left nothing behind
    let listing = server.get("/api/threads").await;
    let body: Value = listing.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

// ============================================================================
// Thread Listing and Detail Tests
// ============================================================================

#[tokio::test]
async fn test_list_threads_newest_first() {
    let (server, _db) = create_test_server();

    let first = create_thread(&server, "First", "Content 1").await;
    let second = create_thread(&server, "Second", "Content 2").await;
    let third = create_thread(&server, "Third", "Content 3").await;

    let response = server.get("/api/threads").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let threads = body["data"].as_array().unwrap();
    assert_eq!(threads.len(), 3);
    assert_eq!(threads[0]["id"].as_i64().unwrap(), third);
    assert_eq!(threads[1]["id"].as_i64().unwrap(), second);
    assert_eq!(threads[2]["id"].as_i64().unwrap(), first);
}

#[tokio::test]
async fn test_list_threads_carries_preview_not_full_content() {
    let (server, _db) = create_test_server();

    let long_content = "x".repeat(500);
    create_thread(&server, "Long thread", &long_content).await;

    let response = server.get("/api/threads").await;
    let body: Value = response.json();
    let threads = body["data"].as_array().unwrap();

    let preview = threads[0]["preview"].as_str().unwrap();
    assert_eq!(preview.chars().count(), 200);
    assert!(threads[0].get("content").is_none());
}

#[tokio::test]
async fn test_get_thread_returns_full_content() {
    let (server, _db) = create_test_server();

    let long_content = "y".repeat(500);
    let id = create_thread(&server, "Long thread", &long_content).await;

    let response = server.get(&format!("/api/threads/{id}")).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["content"].as_str().unwrap(), long_content);
}

#[tokio::test]
async fn test_get_thread_not_found() {
    let (server, _db) = create_test_server();

    let response = server.get("/api/threads/999").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// ============================================================================
// Reply Tests
// ============================================================================

#[tokio::test]
async fn test_create_reply_increments_count() {
    let (server, _db) = create_test_server();

    let id = create_thread(&server, "Topic", "Body").await;

    let response = server
        .post(&format!("/api/threads/{id}/replies"))
        .json(&json!({ "content": "First reply" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["thread_id"].as_i64().unwrap(), id);
    assert!(body["data"]["author_username"].is_null());

    // The thread's count reflects the reply immediately
    let thread: Value = server.get(&format!("/api/threads/{id}")).await.json();
    assert_eq!(thread["data"]["reply_count"], 1);
}

#[tokio::test]
async fn test_create_reply_authenticated_anonymous_flag() {
    let (server, _db) = create_test_server();
    let token = register_and_get_token(&server, "bob").await;

    let id = create_thread(&server, "Topic", "Body").await;

    let attributed: Value = server
        .post(&format!("/api/threads/{id}/replies"))
        .authorization_bearer(&token)
        .json(&json!({ "content": "Signed reply" }))
        .await
        .json();
    assert_eq!(attributed["data"]["author_username"], "bob");

    let anonymous: Value = server
        .post(&format!("/api/threads/{id}/replies"))
        .authorization_bearer(&token)
        .json(&json!({ "content": "Unsigned reply", "anonymous": true }))
        .await
        .json();
    assert!(anonymous["data"]["author_username"].is_null());
}

#[tokio::test]
async fn test_list_replies_oldest_first() {
    let (server, _db) = create_test_server();

    let id = create_thread(&server, "Topic", "Body").await;

    for i in 1..=3 {
        server
            .post(&format!("/api/threads/{id}/replies"))
            .json(&json!({ "content": format!("Reply {i}") }))
            .await
            .assert_status_ok();
    }

    let response = server.get(&format!("/api/threads/{id}/replies")).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let replies = body["data"].as_array().unwrap();
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0]["content"], "Reply 1");
    assert_eq!(replies[1]["content"], "Reply 2");
    assert_eq!(replies[2]["content"], "Reply 3");
}

#[tokio::test]
async fn test_reply_to_missing_thread() {
    let (server, _db) = create_test_server();

    let response = server
        .post("/api/threads/999/replies")
        .json(&json!({ "content": "Orphan reply" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_replies_unknown_thread_is_empty() {
    let (server, _db) = create_test_server();

    // Listing never fails; an unknown thread reads as having no replies
    let response = server.get("/api/threads/999/replies").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_replies_empty_thread() {
    let (server, _db) = create_test_server();

    let id = create_thread(&server, "Quiet topic", "Body").await;

    let response = server.get(&format!("/api/threads/{id}/replies")).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_reply_count_matches_reply_rows() {
    let (server, db) = create_test_server();

    let id = create_thread(&server, "Topic", "Body").await;

    for i in 0..5 {
        server
            .post(&format!("/api/threads/{id}/replies"))
            .json(&json!({ "content": format!("Reply {i}") }))
            .await
            .assert_status_ok();
    }

    // The denormalized count agrees with the actual rows
    let guard = db.lock().await;
    let count: i64 = guard
        .conn()
        .query_row(
            "SELECT reply_count FROM threads WHERE id = ?",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    let rows: i64 = guard
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM replies WHERE thread_id = ?",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 5);
    assert_eq!(count, rows);
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[tokio::test]
async fn test_full_posting_scenario() {
    let (server, _db) = create_test_server();

    // alice registers with a short password and logs in
    server
        .post("/api/register")
        .json(&json!({ "username": "alice", "password": "pw1" }))
        .await
        .assert_status_ok();

    let login: Value = server
        .post("/api/login")
        .json(&json!({ "username": "alice", "password": "pw1" }))
        .await
        .json();
    let token = login["data"]["access_token"].as_str().unwrap();

    // She creates a thread under her own name
    let thread: Value = server
        .post("/api/threads")
        .authorization_bearer(token)
        .json(&json!({
            "title": "Independência Já",
            "content": "Vamos discutir"
        }))
        .await
        .json();
    assert_eq!(thread["data"]["author_username"], "alice");
    assert_eq!(thread["data"]["reply_count"], 0);
    let id = thread["data"]["id"].as_i64().unwrap();

    // An anonymous reply arrives
    server
        .post(&format!("/api/threads/{id}/replies"))
        .json(&json!({ "content": "Concordo!" }))
        .await
        .assert_status_ok();

    let replies: Value = server.get(&format!("/api/threads/{id}/replies")).await.json();
    let listed = replies["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0]["author_username"].is_null());

    let detail: Value = server.get(&format!("/api/threads/{id}")).await.json();
    assert_eq!(detail["data"]["reply_count"], 1);
}
