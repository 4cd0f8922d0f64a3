//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                        - Shorten form (HTML)
//! - `POST /`                        - Form submission (HTML)
//! - `GET  /to/{token}`              - Short link redirect (303)
//! - `GET  /health`                  - Health check: DB, cache
//! - `POST /api/v1/shorten/{*url}`   - Shorten (JSON or plain text)
//! - `GET  /api/v1/lookup/{token}`   - Lookup (JSON or plain text)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//!
//! No path normalization: the shorten wildcard captures URLs whose trailing
//! slash is significant.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use crate::web;
use anyhow::Result;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers; when
///   `state.behind_proxy` is set, rate limiting reads the client IP from
///   `X-Forwarded-For` / `X-Real-IP` instead of the peer socket address
/// - `config` - supplies the rate limit quota
///
/// # Errors
///
/// Returns an error if the rate limit quota is invalid (zero).
pub fn app_router(state: AppState, config: &Config) -> Result<Router> {
    let per_second = config.rate_limit_per_second;
    let burst = config.rate_limit_burst;

    let api_router = if state.behind_proxy {
        api::routes::v1_routes().layer(rate_limit::proxy_layer(per_second, burst)?)
    } else {
        api::routes::v1_routes().layer(rate_limit::peer_layer(per_second, burst)?)
    };

    let router = Router::new()
        .merge(web::routes::public_routes())
        .route("/to/{token}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    Ok(router)
}
