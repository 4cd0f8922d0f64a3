//! `Content-Type` negotiation for the API routes.
//!
//! The request's `Content-Type` picks the response representation:
//!
//! | `type/subtype`                                       | Response                          |
//! |------------------------------------------------------|-----------------------------------|
//! | not `application/*` or `text/*`                      | 415, unsupported content type     |
//! | subtype contains `json`, or is `cbor`                | JSON `{status_code, original, shortened}` |
//! | subtype contains `xml`                               | 415, fixed refusal                |
//! | anything else (or no header)                         | plain text                        |
//!
//! Negotiation runs as an extractor, so a rejected request never reaches the
//! service or the store.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::api::dto::url_pair::UrlPairBody;
use crate::error::AppError;

pub const UNSUPPORTED_CONTENT_TYPE_MESSAGE: &str = "Unsupported Content-Type. Please set an \
     acceptable value for the Content-Type header and try again.";

pub const XML_REFUSAL_MESSAGE: &str = "XML is not supported. Please use JSON or plain text.";

const ACCEPTED_TYPES: [&str; 2] = ["application", "text"];
const STRUCTURED_SUBTYPES: [&str; 4] = ["json", "ld+json", "cbor", "vnd.api+json"];

/// Response representation chosen for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// JSON object bodies.
    Structured,
    /// The bare URL (or error message) as `text/plain`.
    Plain,
}

/// Which URL a plain-text success body carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainBody {
    Original,
    Shortened,
}

/// The pair of URLs an API call reports on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPair {
    pub original: String,
    pub shortened: String,
}

impl ResponseFormat {
    /// Picks a format from a raw `Content-Type` value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnsupportedContentType`] for non-`application`/`text`
    /// types, values without a `/`, and XML subtypes.
    pub fn negotiate(content_type: Option<&str>) -> Result<Self, AppError> {
        let Some(content_type) = content_type else {
            return Ok(Self::Plain);
        };

        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let Some((kind, subtype)) = essence.split_once('/') else {
            return Err(AppError::unsupported_content_type(
                UNSUPPORTED_CONTENT_TYPE_MESSAGE,
            ));
        };

        if !ACCEPTED_TYPES.contains(&kind) {
            return Err(AppError::unsupported_content_type(
                UNSUPPORTED_CONTENT_TYPE_MESSAGE,
            ));
        }

        if subtype.contains("json") || STRUCTURED_SUBTYPES.contains(&subtype) {
            Ok(Self::Structured)
        } else if subtype.contains("xml") {
            Err(AppError::unsupported_content_type(XML_REFUSAL_MESSAGE))
        } else {
            Ok(Self::Plain)
        }
    }

    /// Picks a format from request headers.
    ///
    /// # Errors
    ///
    /// See [`Self::negotiate`]; a header that is not valid UTF-8 is also unsupported.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let content_type = match headers.get(header::CONTENT_TYPE) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::unsupported_content_type(UNSUPPORTED_CONTENT_TYPE_MESSAGE)
            })?),
            None => None,
        };

        Self::negotiate(content_type)
    }

    /// Renders a service outcome in this format.
    pub fn respond(self, outcome: Result<UrlPair, AppError>, plain: PlainBody) -> Response {
        match (self, outcome) {
            (Self::Structured, Ok(pair)) => (
                StatusCode::OK,
                Json(UrlPairBody {
                    status_code: StatusCode::OK.as_u16(),
                    original: pair.original,
                    shortened: pair.shortened,
                }),
            )
                .into_response(),
            (Self::Plain, Ok(pair)) => {
                let body = match plain {
                    PlainBody::Original => pair.original,
                    PlainBody::Shortened => pair.shortened,
                };
                (StatusCode::OK, body).into_response()
            }
            (Self::Structured, Err(e)) => e.into_response(),
            (Self::Plain, Err(e)) => e.into_plain_response(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ResponseFormat {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).map_err(AppError::into_plain_response)
    }
}
