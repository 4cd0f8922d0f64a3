//! Handler for the shorten endpoint.

use axum::{
    extract::{Path, RawQuery, State},
    response::Response,
};

use crate::api::negotiation::{PlainBody, ResponseFormat, UrlPair};
use crate::domain::entities::HostContext;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens the URL carried in the request path.
///
/// # Endpoint
///
/// `POST /api/v1/shorten/{*url}`
///
/// The wildcard segment is percent-decoded by the router. A query string on
/// the request belongs to the URL being shortened, so it is re-attached:
/// `POST /api/v1/shorten/https://example.com/search?q=rust` shortens
/// `https://example.com/search?q=rust`.
///
/// # Response
///
/// With `Content-Type: application/json`:
///
/// ```json
/// {
///   "status_code": 200,
///   "original": "https://example.com/page",
///   "shortened": "http://localhost:8080/to/<fingerprint>"
/// }
/// ```
///
/// With `text/plain` (or no `Content-Type`) the body is the short URL alone.
///
/// # Errors
///
/// - 400 if the URL is empty or the host cannot be determined
/// - 409 on a fingerprint collision under the `reject` policy
/// - 415 on an unsupported or XML `Content-Type`
/// - 500 on store failure
pub async fn shorten_handler(
    format: ResponseFormat,
    State(state): State<AppState>,
    host: Result<HostContext, AppError>,
    Path(url): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let original = match query {
        Some(query) => format!("{url}?{query}"),
        None => url,
    };

    let outcome = match host {
        Ok(host) => state
            .shortener
            .shorten(&original, &host)
            .await
            .map(|short| UrlPair {
                original: short.original,
                shortened: short.shortened,
            }),
        Err(e) => Err(e),
    };

    format.respond(outcome, PlainBody::Shortened)
}
