//! Repository trait definitions for the domain layer.
//!
//! The fingerprint store is abstracted behind [`UrlRepository`] so the service
//! can be exercised against `mockall` mocks and the SQLite implementation
//! (`crate::infrastructure::persistence`) can be swapped without touching it.
//!
//! # Testing
//!
//! See integration tests in `tests/repository_url.rs` for usage examples.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
