//! API route configuration.

use crate::api::handlers::{lookup_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /v1/shorten/{*url}` - Shorten the URL in the path
/// - `GET  /v1/lookup/{token}` - Resolve a token without redirecting
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/shorten/{*url}", post(shorten_handler))
        .route("/v1/lookup/{token}", get(lookup_handler))
}
