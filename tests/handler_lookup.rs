mod common;

use axum::http::StatusCode;
use sqlx::SqlitePool;

#[sqlx::test]
async fn test_lookup_json(pool: SqlitePool) {
    let fp = common::create_test_url(&pool, "https://example.com/target").await;
    let server = common::create_test_server(pool);

    let response = server
        .get(&format!("/api/v1/lookup/{fp}"))
        .add_header("Host", common::HOST)
        .add_header("Content-Type", "application/json")
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status_code"], 200);
    assert_eq!(json["original"], "https://example.com/target");
    assert_eq!(json["shortened"], format!("http://localhost:8080/to/{fp}"));
}

#[sqlx::test]
async fn test_lookup_plain_text(pool: SqlitePool) {
    let fp = common::create_test_url(&pool, "https://example.com/target").await;
    let server = common::create_test_server(pool);

    let response = server
        .get(&format!("/api/v1/lookup/{fp}"))
        .add_header("Host", common::HOST)
        .add_header("Content-Type", "text/plain")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "https://example.com/target");
}

#[sqlx::test]
async fn test_lookup_not_found_json(pool: SqlitePool) {
    let server = common::create_test_server(pool);

    let response = server
        .get("/api/v1/lookup/0123456789abcdef0123456789abcdef")
        .add_header("Host", common::HOST)
        .add_header("Content-Type", "application/json")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status_code"], 404);
    assert_eq!(json["error"], "Short link not found");
}

#[sqlx::test]
async fn test_lookup_malformed_token_plain(pool: SqlitePool) {
    let server = common::create_test_server(pool);

    let response = server
        .get("/api/v1/lookup/nonexistent-token")
        .add_header("Host", common::HOST)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Short link not found");
}

#[sqlx::test]
async fn test_lookup_after_shorten_round_trips(pool: SqlitePool) {
    let server = common::create_test_server(pool);

    let shortened = server
        .post(&format!(
            "/api/v1/shorten/{}",
            common::encode_segment("https://example.com/round/trip/")
        ))
        .add_header("Host", common::HOST)
        .add_header("Content-Type", "text/plain")
        .await
        .text();

    let token = shortened.rsplit('/').next().unwrap().to_string();

    let response = server
        .get(&format!("/api/v1/lookup/{token}"))
        .add_header("Host", common::HOST)
        .add_header("Content-Type", "text/plain")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "https://example.com/round/trip/");
}
