//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. Handlers
//! propagate it with `?` and axum renders it through [`IntoResponse`] as
//! `{"status_code": <u16>, "error": "<message>"}`. The API negotiation layer
//! can render the same error as plain text instead
//! (see [`crate::api::negotiation`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Message returned to clients for failures whose details must stay internal.
pub const GENERIC_ERROR_MESSAGE: &str = "An error has occurred :(";

/// JSON error body shared by every structured error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Empty or malformed input rejected before touching the store.
    #[error("{0}")]
    InvalidInput(String),

    /// The request's `Content-Type` cannot be served by the API.
    #[error("{0}")]
    UnsupportedContentType(String),

    /// No record matches the presented token or id.
    #[error("{0}")]
    NotFound(String),

    /// A different URL already occupies this fingerprint and the
    /// configured collision policy refuses to merge them.
    #[error("fingerprint {fingerprint} is already taken by a different URL")]
    FingerprintCollision { fingerprint: String },

    /// The durable medium is unreachable or a write could not be committed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn unsupported_content_type(message: impl Into<String>) -> Self {
        Self::UnsupportedContentType(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::FingerprintCollision { .. } => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients.
    ///
    /// Storage failures are replaced by a generic message.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Logs the full error when its details are hidden from clients.
    pub fn log_internal(&self) {
        if let Self::Storage(e) = self {
            error!("Storage failure: {}", e);
        }
    }

    /// Builds the structured body for this error.
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            status_code: self.status_code().as_u16(),
            error: self.public_message(),
        }
    }

    /// Renders this error as a `text/plain` response.
    pub fn into_plain_response(self) -> Response {
        self.log_internal();
        (self.status_code(), self.public_message()).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "Invalid input".to_string());

        Self::InvalidInput(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log_internal();
        let status = self.status_code();
        (status, Json(self.to_error_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "URL must not be empty"))]
        url: String,
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_input("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unsupported_content_type("x").status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::FingerprintCollision {
                fingerprint: "abc".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Storage(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_is_repeatable() {
        let err = AppError::Storage(sqlx::Error::PoolClosed);
        assert_eq!(err.public_message(), err.public_message());
        assert_eq!(
            AppError::not_found("Short link not found").public_message(),
            "Short link not found"
        );
    }

    #[test]
    fn test_storage_error_message_is_generic() {
        let err = AppError::Storage(sqlx::Error::PoolClosed);
        assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);

        let body = err.to_error_body();
        assert_eq!(body.status_code, 500);
        assert_eq!(body.error, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_structured_error_body() {
        let body = AppError::not_found("Short link not found").to_error_body();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status_code"], 404);
        assert_eq!(json["error"], "Short link not found");
    }

    #[test]
    fn test_validation_errors_map_to_invalid_input() {
        let form = Form { url: String::new() };
        let err: AppError = form.validate().unwrap_err().into();

        match err {
            AppError::InvalidInput(message) => assert_eq!(message, "URL must not be empty"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("missing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::invalid_input("empty").into_plain_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
