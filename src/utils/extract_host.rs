//! Host context extraction from HTTP requests.

use crate::AppError;
use crate::domain::entities::HostContext;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderName, header, request::Parts};

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Extracts the host the client addressed from the `Host` header.
///
/// Unlike a bare domain, the port is kept: a short URL minted for
/// `localhost:8080` must point back at `localhost:8080`.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if:
/// - The `Host` header is missing or empty
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "example.com:8080".parse().unwrap());
///
/// let host = extract_host_from_headers(&headers).unwrap();
/// assert_eq!(host, "example.com:8080");
/// ```
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    header_str(headers, &header::HOST)?
        .map(str::to_string)
        .ok_or_else(|| AppError::invalid_input("Missing Host header"))
}

/// Builds the [`HostContext`] short URLs are published under.
///
/// Host: `X-Forwarded-Host` (when `behind_proxy`), else `Host`, else the
/// request URI's authority (HTTP/2 `:authority`).
///
/// Scheme: `public_scheme` if configured, else `X-Forwarded-Proto` (when
/// `behind_proxy`), else `http`.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if no host can be determined.
pub fn host_context_from_parts(
    parts: &Parts,
    public_scheme: Option<&str>,
    behind_proxy: bool,
) -> Result<HostContext, AppError> {
    let forwarded_host = if behind_proxy {
        header_str(&parts.headers, &X_FORWARDED_HOST)?.map(first_value)
    } else {
        None
    };

    let host = match forwarded_host {
        Some(host) => host.to_string(),
        None => match extract_host_from_headers(&parts.headers) {
            Ok(host) => host,
            Err(e) => parts
                .uri
                .authority()
                .map(|authority| authority.as_str().to_string())
                .ok_or(e)?,
        },
    };

    let scheme = match public_scheme {
        Some(scheme) => scheme.to_string(),
        None if behind_proxy => header_str(&parts.headers, &X_FORWARDED_PROTO)?
            .map(first_value)
            .unwrap_or("http")
            .to_ascii_lowercase(),
        None => "http".to_string(),
    };

    Ok(HostContext::new(scheme, host))
}

impl FromRequestParts<AppState> for HostContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        host_context_from_parts(parts, state.public_scheme.as_deref(), state.behind_proxy)
    }
}

/// Reads a header as trimmed, non-empty UTF-8.
fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Result<Option<&'a str>, AppError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::invalid_input(format!("Invalid {} header", name)))?
        .trim();

    Ok((!value.is_empty()).then_some(value))
}

/// Proxies append to `X-Forwarded-*` lists; the client-facing value is first.
fn first_value(value: &str) -> &str {
    value.split(',').next().unwrap_or(value).trim()
}
