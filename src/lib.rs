//! # Fingerprint URL Shortener
//!
//! A URL shortener whose tokens are content-addressed: the token for a URL is
//! the MD5 fingerprint of its exact text, so shortening the same URL twice
//! always yields the same short link and stores one row.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Records, fingerprints, and the store trait
//! - **Application Layer** ([`application`]) - Shorten / resolve / redirect orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite store and lookup cache
//! - **API Layer** ([`api`]) - Content-negotiated JSON / plain-text endpoints
//! - **Web Layer** ([`web`]) - HTML shorten form
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortened.db"   # created if missing
//! export REDIS_URL="redis://localhost:6379"     # Optional
//!
//! cargo run
//!
//! curl -X POST -H 'Content-Type: application/json' \
//!     'http://localhost:8080/api/v1/shorten/https://example.com/page'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortenerService;
    pub use crate::domain::entities::{HostContext, ShortUrl, ShortenOutcome, Stored, UrlRecord};
    pub use crate::domain::fingerprint::{CollisionPolicy, fingerprint};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
