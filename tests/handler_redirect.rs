mod common;

use axum::http::StatusCode;
use sqlx::SqlitePool;

#[sqlx::test]
async fn test_redirect_success(pool: SqlitePool) {
    let fp = common::create_test_url(&pool, "https://example.com/target").await;
    let server = common::create_test_server(pool);

    let response = server
        .get(&format!("/to/{fp}"))
        .add_header("Host", common::HOST)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: SqlitePool) {
    let server = common::create_test_server(pool);

    let response = server
        .get("/to/0123456789abcdef0123456789abcdef")
        .add_header("Host", common::HOST)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Short link not found");
}

#[sqlx::test]
async fn test_redirect_malformed_token(pool: SqlitePool) {
    let server = common::create_test_server(pool);

    let response = server
        .get("/to/nonexistent-token")
        .add_header("Host", common::HOST)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_redirect_encodes_non_ascii_location(pool: SqlitePool) {
    let fp = common::create_test_url(&pool, "https://example.com/café").await;
    let server = common::create_test_server(pool);

    let response = server
        .get(&format!("/to/{fp}"))
        .add_header("Host", common::HOST)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "https://example.com/caf%C3%A9");
}
