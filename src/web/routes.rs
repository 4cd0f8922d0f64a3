//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{form_handler, submit_handler};
use axum::{Router, routing::get};

/// Browser-facing routes.
///
/// # Endpoints
///
/// - `GET  /` - Shorten form
/// - `POST /` - Submit the form, render the short URL
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(form_handler).post(submit_handler))
}
