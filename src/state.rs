//! Shared application state.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::SqliteUrlRepository;

/// State injected into every handler.
///
/// Cheap to clone: everything heavy sits behind an `Arc`, and the repository
/// inside the service owns the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService<SqliteUrlRepository>>,
    pub cache: Arc<dyn CacheService>,
    /// Scheme forced onto every short URL (`PUBLIC_SCHEME`), if any.
    pub public_scheme: Option<String>,
    /// Trust `X-Forwarded-*` headers (`BEHIND_PROXY`).
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(repository: SqliteUrlRepository, cache: Arc<dyn CacheService>) -> Self {
        let shortener = Arc::new(ShortenerService::new(Arc::new(repository), cache.clone()));

        Self {
            shortener,
            cache,
            public_scheme: None,
            behind_proxy: false,
        }
    }

    /// Applies the request-facing settings from `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.public_scheme = config.public_scheme.clone();
        self.behind_proxy = config.behind_proxy;
        self
    }
}
