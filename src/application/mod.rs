//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI one place to call into.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Shorten, resolve, and redirect

pub mod services;
