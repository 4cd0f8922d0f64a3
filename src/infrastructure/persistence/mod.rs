//! SQLite persistence.
//!
//! - [`pool`] - Connection pool construction and migrations
//! - [`SqliteUrlRepository`] - The fingerprint store

pub mod pool;
pub mod sqlite_url_repository;

pub use sqlite_url_repository::SqliteUrlRepository;
