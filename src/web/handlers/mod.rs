//! HTML template rendering handlers.

mod form;

pub use form::{ShortenForm, form_handler, submit_handler};
