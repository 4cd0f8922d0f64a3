#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use fingerprint_shortener::config::Config;
use fingerprint_shortener::domain::fingerprint::fingerprint;
use fingerprint_shortener::infrastructure::cache::NullCache;
use fingerprint_shortener::infrastructure::persistence::SqliteUrlRepository;
use fingerprint_shortener::routes::app_router;
use fingerprint_shortener::state::AppState;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const HOST: &str = "localhost:8080";

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(SqliteUrlRepository::new(pool), Arc::new(NullCache::new()))
}

/// Full application router, with a fake peer address for the rate limiter.
pub fn create_test_server(pool: SqlitePool) -> TestServer {
    let app = app_router(create_test_state(pool), &Config::default())
        .unwrap()
        .layer(MockConnectInfoLayer);

    TestServer::new(app).unwrap()
}

/// Inserts a row directly, bypassing the service.
pub async fn create_test_url(pool: &SqlitePool, url: &str) -> String {
    let fp = fingerprint(url);

    sqlx::query("INSERT INTO urls (original, fingerprint, created_at) VALUES (?1, ?2, ?3)")
        .bind(url)
        .bind(&fp)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await
        .unwrap();

    fp
}

pub async fn count_urls(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Percent-encodes a URL so it fits in a single path segment.
pub fn encode_segment(url: &str) -> String {
    url::form_urlencoded::byte_serialize(url.as_bytes()).collect()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
