//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of `fingerprint → original URL`.
///
/// Records never change once stored, so entries are never invalidated; they
/// only age out by TTL. Implementations must degrade to misses on failure so
/// lookups fall back to the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL cached under a fingerprint.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, fingerprint: &str) -> CacheResult<Option<String>>;

    /// Caches a fingerprint mapping, with the implementation's default TTL
    /// when `ttl_seconds` is `None`.
    async fn set_url(
        &self,
        fingerprint: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short human-readable backend name for health reports.
    fn backend(&self) -> &'static str;
}
