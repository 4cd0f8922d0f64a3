//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortened.db"
//! export REDIS_URL="redis://localhost:6379/0"   # optional
//! export LISTEN="0.0.0.0:8080"
//! ```
//!
//! If `REDIS_URL` is not set it is built from `REDIS_HOST`, `REDIS_PORT`,
//! `REDIS_PASSWORD`, and `REDIS_DB`; with neither, caching is disabled.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-*` headers (default: `false`)
//! - `PUBLIC_SCHEME` - Force `http` or `https` in short URLs
//! - `CACHE_TTL_SECONDS` - Redis entry TTL (default: 86400)
//! - `COLLISION_POLICY` - `merge` or `reject` (default: `merge`)
//! - `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST` - API rate limit (default: 2 / 100)
//! - `DB_MAX_CONNECTIONS`, `DB_CONNECT_TIMEOUT`, `DB_IDLE_TIMEOUT`,
//!   `DB_MAX_LIFETIME`, `DB_BUSY_TIMEOUT` - SQLite pool settings

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::domain::fingerprint::CollisionPolicy;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, client IP, host, and scheme are read from `X-Forwarded-*` headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Scheme forced onto short URLs regardless of how the request arrived.
    pub public_scheme: Option<String>,
    /// TTL (seconds) for cached fingerprint lookups in Redis.
    pub cache_ttl_seconds: u64,
    pub collision_policy: CollisionPolicy,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// Idle connection lifetime in seconds before it is closed
    /// (`DB_IDLE_TIMEOUT`, default: 600).
    pub db_idle_timeout: u64,
    /// Maximum connection lifetime in seconds (`DB_MAX_LIFETIME`, default: 1800).
    pub db_max_lifetime: u64,
    /// How long a writer waits on a locked database in seconds
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://shortened.db".to_string(),
            redis_url: None,
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            public_scheme: None,
            cache_ttl_seconds: 86_400,
            collision_policy: CollisionPolicy::Merge,
            rate_limit_per_second: 2,
            rate_limit_burst: 100,
            db_max_connections: 10,
            db_connect_timeout: 30,
            db_idle_timeout: 600,
            db_max_lifetime: 1800,
            db_busy_timeout: 5,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `COLLISION_POLICY` holds an unknown value.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let collision_policy = match env::var("COLLISION_POLICY") {
            Ok(v) => CollisionPolicy::from_str(&v)
                .map_err(anyhow::Error::msg)
                .context("Invalid COLLISION_POLICY")?,
            Err(_) => defaults.collision_policy,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: Self::load_redis_url(),
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            behind_proxy: env::var("BEHIND_PROXY")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.behind_proxy),
            public_scheme: env::var("PUBLIC_SCHEME")
                .ok()
                .map(|v| v.trim().to_ascii_lowercase())
                .filter(|v| !v.is_empty()),
            cache_ttl_seconds: parse_or("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            collision_policy,
            rate_limit_per_second: parse_or("RATE_LIMIT_PER_SECOND", defaults.rate_limit_per_second),
            rate_limit_burst: parse_or("RATE_LIMIT_BURST", defaults.rate_limit_burst),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_connect_timeout: parse_or("DB_CONNECT_TIMEOUT", defaults.db_connect_timeout),
            db_idle_timeout: parse_or("DB_IDLE_TIMEOUT", defaults.db_idle_timeout),
            db_max_lifetime: parse_or("DB_MAX_LIFETIME", defaults.db_max_lifetime),
            db_busy_timeout: parse_or("DB_BUSY_TIMEOUT", defaults.db_busy_timeout),
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            Some(pwd) => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            None => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                mask_connection_string(&self.database_url)
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if let Some(ref scheme) = self.public_scheme
            && scheme != "http"
            && scheme != "https"
        {
            anyhow::bail!("PUBLIC_SCHEME must be 'http' or 'https', got '{}'", scheme);
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.rate_limit_per_second == 0 || self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether Redis caching is enabled.
    pub fn is_cache_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", mask_connection_string(&self.database_url));

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {} (enabled)", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Redis: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Collision policy: {}", self.collision_policy);
        tracing::info!(
            "  Rate limit: {}/s, burst {}",
            self.rate_limit_per_second,
            self.rate_limit_burst
        );
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
