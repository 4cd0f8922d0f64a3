//! HTTP API layer.
//!
//! Translates requests into [`ShortenerService`](crate::application::services::ShortenerService)
//! calls and renders results according to the request's `Content-Type`.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`negotiation`] - `Content-Type` negotiation
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod negotiation;
pub mod routes;
