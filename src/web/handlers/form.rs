//! HTML shorten form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{HostContext, ShortenOutcome};
use crate::error::AppError;
use crate::state::AppState;

/// Form body posted by `templates/shorten_form.html`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter a URL to shorten"))]
    pub url: String,
}

/// The entry form, optionally with the previous input and an error.
#[derive(Template, WebTemplate)]
#[template(path = "shorten_form.html")]
struct ShortenFormTemplate {
    url: String,
    error: Option<String>,
}

/// The result page for a successful shorten.
#[derive(Template, WebTemplate)]
#[template(path = "shorten_view.html")]
struct ShortenViewTemplate {
    original: String,
    shortened: String,
    deduplicated: bool,
}

/// Renders the empty form.
///
/// # Endpoint
///
/// `GET /`
pub async fn form_handler() -> impl IntoResponse {
    ShortenFormTemplate {
        url: String::new(),
        error: None,
    }
}

/// Shortens the submitted URL and renders the result.
///
/// # Endpoint
///
/// `POST /` (`application/x-www-form-urlencoded`, field `url`)
///
/// On failure the form is re-rendered with the input kept and the error
/// shown, using the error's HTTP status.
pub async fn submit_handler(
    State(state): State<AppState>,
    host: Result<HostContext, AppError>,
    Form(form): Form<ShortenForm>,
) -> Response {
    match shorten(&state, host, &form).await {
        Ok(view) => view.into_response(),
        Err(e) => {
            e.log_internal();
            (
                e.status_code(),
                ShortenFormTemplate {
                    url: form.url,
                    error: Some(e.public_message()),
                },
            )
                .into_response()
        }
    }
}

async fn shorten(
    state: &AppState,
    host: Result<HostContext, AppError>,
    form: &ShortenForm,
) -> Result<ShortenViewTemplate, AppError> {
    form.validate()?;
    let host = host?;

    let short = state.shortener.shorten(&form.url, &host).await?;

    Ok(ShortenViewTemplate {
        original: short.original,
        shortened: short.shortened,
        deduplicated: short.outcome == ShortenOutcome::Deduplicated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_validation() {
        let empty = ShortenForm { url: String::new() };
        assert!(empty.validate().is_err());

        let filled = ShortenForm {
            url: "https://example.com".to_string(),
        };
        assert!(filled.validate().is_ok());
    }

    #[test]
    fn test_form_template_renders_error() {
        let html = ShortenFormTemplate {
            url: "<bad>".to_string(),
            error: Some("Please enter a URL to shorten".to_string()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Please enter a URL to shorten"));
        assert!(html.contains("&#60;bad&#62;") || html.contains("&lt;bad&gt;"));
    }

    #[test]
    fn test_view_template_renders_urls() {
        let html = ShortenViewTemplate {
            original: "https://example.com/page".to_string(),
            shortened: "http://localhost:8080/to/abc".to_string(),
            deduplicated: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("https://example.com/page"));
        assert!(html.contains("http://localhost:8080/to/abc"));
        assert!(html.contains("already been shortened"));
    }
}
