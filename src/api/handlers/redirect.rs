//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a token to its original URL.
///
/// # Endpoint
///
/// `GET /to/{token}`
///
/// # Request Flow
///
/// 1. [`ShortenerService::redirect`](crate::application::services::ShortenerService::redirect)
///    resolves the token (cache first, then store)
/// 2. Returns 303 See Other with the original URL in `Location`
///
/// # Errors
///
/// Returns 404 Not Found (plain text) if the token is unknown.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let instruction = match state.shortener.redirect(&token).await {
        Ok(instruction) => instruction,
        Err(e) => return e.into_plain_response(),
    };

    let location = match location_header(&instruction.location) {
        Ok(location) => location,
        Err(e) => return e.into_plain_response(),
    };

    let status = StatusCode::from_u16(instruction.status).unwrap_or(StatusCode::SEE_OTHER);

    (status, [(header::LOCATION, location)]).into_response()
}

/// Builds a `Location` value, percent-encoding URLs that are not header-safe.
///
/// Stored URLs are arbitrary text; non-ASCII hosts and paths go through
/// [`Url`] serialization (punycode and percent-encoding).
fn location_header(location: &str) -> Result<HeaderValue, AppError> {
    if location.is_ascii()
        && let Ok(value) = HeaderValue::from_str(location)
    {
        return Ok(value);
    }

    Url::parse(location)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            warn!("Stored URL is not a valid Location header: {:?}", location);
            AppError::invalid_input("Stored URL cannot be used as a redirect target")
        })
}
