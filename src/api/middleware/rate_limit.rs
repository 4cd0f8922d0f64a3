//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Result, anyhow};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-client rate limiter keyed by `key_extractor`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst_size` is zero.
pub fn layer<K: KeyExtractor>(
    key_extractor: K,
    per_second: u64,
    burst_size: u32,
) -> Result<RateLimitLayer<K>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .ok_or_else(|| {
            anyhow!(
                "Invalid rate limit: {} per second, burst {}",
                per_second,
                burst_size
            )
        })?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Rate limiter keyed by the socket peer address.
///
/// Requires the server to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten/{*url}", post(shorten_handler))
///     .layer(rate_limit::peer_layer(2, 100)?);
/// ```
pub fn peer_layer(per_second: u64, burst_size: u32) -> Result<RateLimitLayer<PeerIpKeyExtractor>> {
    layer(PeerIpKeyExtractor, per_second, burst_size)
}

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
/// falling back to the peer address.
///
/// Only use behind a trusted reverse proxy: clients can forge these headers.
pub fn proxy_layer(
    per_second: u64,
    burst_size: u32,
) -> Result<RateLimitLayer<SmartIpKeyExtractor>> {
    layer(SmartIpKeyExtractor, per_second, burst_size)
}
