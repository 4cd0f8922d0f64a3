//! Handler for the lookup endpoint.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::api::negotiation::{PlainBody, ResponseFormat, UrlPair};
use crate::domain::entities::HostContext;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a token to its original URL without redirecting.
///
/// # Endpoint
///
/// `GET /api/v1/lookup/{token}`
///
/// The structured body mirrors the shorten endpoint, with `shortened` set to
/// the full short URL for the requesting host. The plain body is the original
/// URL.
///
/// # Errors
///
/// - 404 if no record has this token
/// - 415 on an unsupported or XML `Content-Type`
pub async fn lookup_handler(
    format: ResponseFormat,
    State(state): State<AppState>,
    host: Result<HostContext, AppError>,
    Path(token): Path<String>,
) -> Response {
    let outcome = match host {
        Ok(host) => state
            .shortener
            .resolve(&token)
            .await
            .map(|original| UrlPair {
                original,
                shortened: host.short_url(&token),
            }),
        Err(e) => Err(e),
    };

    format.respond(outcome, PlainBody::Original)
}
