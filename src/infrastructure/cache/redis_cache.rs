//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

const KEY_PREFIX: &str = "fp:";

/// Redis cache of fingerprint lookups.
///
/// `ConnectionManager` reconnects on its own and is cheap to clone per call.
/// All operations are fail-open: errors are logged and reported as misses.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_url`] is called
    /// without an explicit TTL (`CACHE_TTL_SECONDS`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    fn build_key(fingerprint: &str) -> String {
        format!("{}{}", KEY_PREFIX, fingerprint)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, fingerprint: &str) -> CacheResult<Option<String>> {
        let key = Self::build_key(fingerprint);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {}", fingerprint);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", fingerprint);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", fingerprint, e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        fingerprint: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = Self::build_key(fingerprint);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn.set_ex::<_, _, ()>(&key, original_url, ttl).await {
            warn!("Redis SET error for {}: {}", fingerprint, e);
        } else {
            debug!("Cache SET: {} (TTL: {}s)", fingerprint, ttl);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
