//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::infrastructure::cache::NullCache;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Counts stored records
/// 2. **Cache**: Redis PING, or always ok when caching is disabled
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 records" },
///     "cache": { "status": "ok", "message": "redis connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting records.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.shortener.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} records")),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

/// Checks cache connectivity via the backend's health probe.
async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if backend == NullCache::BACKEND {
        return CheckStatus::ok("caching disabled");
    }

    if state.cache.health_check().await {
        CheckStatus::ok(format!("{backend} connected"))
    } else {
        CheckStatus::error(format!("{backend} connection failed"))
    }
}
