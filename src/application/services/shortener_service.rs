//! URL shortening, lookup, and redirect service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{
    HostContext, RedirectInstruction, ShortUrl, ShortenOutcome, Stored, UrlRecord,
};
use crate::domain::fingerprint::is_fingerprint;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

const NOT_FOUND_MESSAGE: &str = "Short link not found";

/// Orchestrates the fingerprint store and the lookup cache.
///
/// Handlers call straight into these methods; response formatting lives in
/// the API layer and never feeds back into control flow.
pub struct ShortenerService<R: UrlRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: UrlRepository> ShortenerService<R> {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Shortens `original`, reusing the existing record if it was shortened before.
    ///
    /// The short URL is `{scheme}://{host}/to/{fingerprint}`. The returned
    /// `original` is the submitted text, even when a colliding URL already
    /// owns the fingerprint and the stored row is reused.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `original` is empty.
    /// Propagates store errors ([`AppError::Storage`],
    /// [`AppError::FingerprintCollision`]).
    pub async fn shorten(&self, original: &str, host: &HostContext) -> Result<ShortUrl, AppError> {
        if original.is_empty() {
            return Err(AppError::invalid_input("URL must not be empty"));
        }

        let stored = self.repository.insert_if_absent(original).await?;
        let outcome = match &stored {
            Stored::Created(record) => {
                info!(id = record.id, fingerprint = %record.fingerprint, "Stored new URL");
                ShortenOutcome::Stored
            }
            Stored::Existing(record) => {
                debug!(id = record.id, fingerprint = %record.fingerprint, "Deduplicated URL");
                ShortenOutcome::Deduplicated
            }
        };

        let record = stored.into_record();
        self.remember(&record.fingerprint, &record.original).await;

        Ok(ShortUrl {
            shortened: host.short_url(&record.fingerprint),
            original: original.to_string(),
            fingerprint: record.fingerprint,
            outcome,
        })
    }

    /// Resolves a token to the original URL.
    ///
    /// Checks the cache first and falls back to the store on a miss or a
    /// cache failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this fingerprint.
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn resolve(&self, token: &str) -> Result<String, AppError> {
        if !is_fingerprint(token) {
            debug!("Rejecting malformed token {:?}", token);
            return Err(AppError::not_found(NOT_FOUND_MESSAGE));
        }

        match self.cache.get_url(token).await {
            Ok(Some(original)) => return Ok(original),
            Ok(None) => {}
            Err(e) => warn!("Cache error, falling back to store: {}", e),
        }

        let record = self
            .repository
            .find_by_fingerprint(token)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

        self.remember(&record.fingerprint, &record.original).await;

        Ok(record.original)
    }

    /// Resolves a token into a 303 See Other redirect.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`]; a miss is [`AppError::NotFound`], never an
    /// internal fault.
    pub async fn redirect(&self, token: &str) -> Result<RedirectInstruction, AppError> {
        let location = self.resolve(token).await?;
        Ok(RedirectInstruction::see_other(location))
    }

    /// Looks a record up by its internal row id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row has this id.
    pub async fn find_by_id(&self, id: i64) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No record with id {id}")))
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    async fn remember(&self, fingerprint: &str, original: &str) {
        if let Err(e) = self.cache.set_url(fingerprint, original, None).await {
            warn!("Failed to cache {}: {}", fingerprint, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fingerprint::fingerprint;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{CacheError, CacheResult, NullCache};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory cache double that records what was written.
    #[derive(Default)]
    struct MapCache {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl CacheService for MapCache {
        async fn get_url(&self, fingerprint: &str) -> CacheResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(fingerprint).cloned())
        }

        async fn set_url(
            &self,
            fingerprint: &str,
            original_url: &str,
            _ttl_seconds: Option<u64>,
        ) -> CacheResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(fingerprint.to_string(), original_url.to_string());
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }

        fn backend(&self) -> &'static str {
            "memory"
        }
    }

    /// Cache double whose backend is always down.
    struct FailingCache;

    #[async_trait]
    impl CacheService for FailingCache {
        async fn get_url(&self, _fingerprint: &str) -> CacheResult<Option<String>> {
            Err(CacheError::OperationError("connection reset".to_string()))
        }

        async fn set_url(
            &self,
            _fingerprint: &str,
            _original_url: &str,
            _ttl_seconds: Option<u64>,
        ) -> CacheResult<()> {
            Err(CacheError::OperationError("connection reset".to_string()))
        }

        async fn health_check(&self) -> bool {
            false
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn create_test_record(id: i64, url: &str) -> UrlRecord {
        UrlRecord::new(id, url.to_string(), fingerprint(url), Utc::now())
    }

    fn localhost() -> HostContext {
        HostContext::new("http", "localhost:8080")
    }

    fn service(repo: MockUrlRepository) -> ShortenerService<MockUrlRepository> {
        ShortenerService::new(Arc::new(repo), Arc::new(NullCache::new()))
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(1, "https://example.com/page");
        mock_repo
            .expect_insert_if_absent()
            .withf(|url| url == "https://example.com/page")
            .times(1)
            .returning(move |_| Ok(Stored::Created(record.clone())));

        let result = service(mock_repo)
            .shorten("https://example.com/page", &localhost())
            .await
            .unwrap();

        let fp = fingerprint("https://example.com/page");
        assert_eq!(result.original, "https://example.com/page");
        assert_eq!(result.shortened, format!("http://localhost:8080/to/{fp}"));
        assert_eq!(result.fingerprint, fp);
        assert_eq!(result.outcome, ShortenOutcome::Stored);
    }

    #[tokio::test]
    async fn test_shorten_deduplicated() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(7, "https://dup.example");
        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(move |_| Ok(Stored::Existing(record.clone())));

        let result = service(mock_repo)
            .shorten("https://dup.example", &localhost())
            .await
            .unwrap();

        assert_eq!(result.outcome, ShortenOutcome::Deduplicated);
        assert_eq!(result.fingerprint, fingerprint("https://dup.example"));
    }

    #[tokio::test]
    async fn test_shorten_merged_collision_reports_submitted_url() {
        let mut mock_repo = MockUrlRepository::new();

        // Stored row owns the fingerprint of a different URL.
        let record = UrlRecord::new(
            3,
            "https://first.example".to_string(),
            fingerprint("https://second.example"),
            Utc::now(),
        );
        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(move |_| Ok(Stored::Existing(record.clone())));

        let result = service(mock_repo)
            .shorten("https://second.example", &localhost())
            .await
            .unwrap();

        let fp = fingerprint("https://second.example");
        assert_eq!(result.original, "https://second.example");
        assert_eq!(result.shortened, format!("http://localhost:8080/to/{fp}"));
        assert_eq!(result.outcome, ShortenOutcome::Deduplicated);
    }

    #[tokio::test]
    async fn test_shorten_empty_url_never_touches_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_insert_if_absent().times(0);

        let result = service(mock_repo).shorten("", &localhost()).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_shorten_propagates_storage_error() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(AppError::Storage(sqlx::Error::PoolTimedOut)));

        let result = service(mock_repo)
            .shorten("https://example.com", &localhost())
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(3, "https://example.com/target");
        let fp = record.fingerprint.clone();
        mock_repo
            .expect_find_by_fingerprint()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let original = service(mock_repo).resolve(&fp).await.unwrap();

        assert_eq!(original, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_by_fingerprint()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo)
            .resolve(&fingerprint("https://never-stored.example"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_malformed_token_skips_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_by_fingerprint().times(0);

        let result = service(mock_repo).resolve("nonexistent-token").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_uses_cache_after_first_lookup() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(4, "https://cached.example");
        let fp = record.fingerprint.clone();
        mock_repo
            .expect_find_by_fingerprint()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = ShortenerService::new(Arc::new(mock_repo), Arc::new(MapCache::default()));

        assert_eq!(service.resolve(&fp).await.unwrap(), "https://cached.example");
        assert_eq!(service.resolve(&fp).await.unwrap(), "https://cached.example");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_store_on_cache_error() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(8, "https://fallback.example");
        let fp = record.fingerprint.clone();
        mock_repo
            .expect_find_by_fingerprint()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = ShortenerService::new(Arc::new(mock_repo), Arc::new(FailingCache));

        assert_eq!(
            service.resolve(&fp).await.unwrap(),
            "https://fallback.example"
        );
    }

    #[tokio::test]
    async fn test_shorten_warms_cache() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(5, "https://warm.example");
        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(move |_| Ok(Stored::Created(record.clone())));
        mock_repo.expect_find_by_fingerprint().times(0);

        let service = ShortenerService::new(Arc::new(mock_repo), Arc::new(MapCache::default()));

        let short = service
            .shorten("https://warm.example", &localhost())
            .await
            .unwrap();
        let original = service.resolve(&short.fingerprint).await.unwrap();

        assert_eq!(original, "https://warm.example");
    }

    #[tokio::test]
    async fn test_redirect_is_see_other() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(6, "https://example.com/next");
        let fp = record.fingerprint.clone();
        mock_repo
            .expect_find_by_fingerprint()
            .returning(move |_| Ok(Some(record.clone())));

        let redirect = service(mock_repo).redirect(&fp).await.unwrap();

        assert_eq!(redirect.status, 303);
        assert_eq!(redirect.location, "https://example.com/next");
    }

    #[tokio::test]
    async fn test_redirect_miss_is_not_found() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_find_by_fingerprint()
            .returning(|_| Ok(None));

        let result = service(mock_repo)
            .redirect(&fingerprint("https://gone.example"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let mut mock_repo = MockUrlRepository::new();

        let record = create_test_record(42, "https://by-id.example");
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .returning(move |_| Ok(Some(record.clone())));
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 43)
            .returning(|_| Ok(None));

        let service = service(mock_repo);

        assert_eq!(
            service.find_by_id(42).await.unwrap().original,
            "https://by-id.example"
        );
        assert!(matches!(
            service.find_by_id(43).await,
            Err(AppError::NotFound(_))
        ));
    }
}
