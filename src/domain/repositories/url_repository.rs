//! Repository trait for the fingerprint store.

use crate::domain::entities::{Stored, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable, deduplicated storage of [`UrlRecord`]s.
///
/// Records are keyed both by fingerprint (the public token) and by row id.
/// There is no update or delete: rows are append-only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores `original` under its fingerprint unless that fingerprint is taken.
    ///
    /// The existence check and the insert are one atomic step: concurrent
    /// calls with the same text end with exactly one row, and all of them see
    /// the same record.
    ///
    /// # Returns
    ///
    /// - `Ok(Stored::Created(_))` when a row was appended
    /// - `Ok(Stored::Existing(_))` when the fingerprint was already present
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `original` is empty.
    /// Returns [`AppError::FingerprintCollision`] if another URL owns the
    /// fingerprint and the collision policy is `reject`.
    /// Returns [`AppError::Storage`] on database errors.
    async fn insert_if_absent(&self, original: &str) -> Result<Stored, AppError>;

    /// Finds a record by its fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its internal row id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
