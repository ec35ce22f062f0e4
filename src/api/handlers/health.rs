//! Handlers for health check endpoints.

use std::collections::BTreeMap;

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{
    CheckStatus, HealthChecks, HealthResponse, ProbeResponse, StoreProbeResponse,
};
use crate::error::AppError;
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
/// 1. **Database**: Reads the last record id
/// 2. **Task Queue**: Checks the worker is still receiving and reports depth
/// 3. **Cache**: PING (always ok when caching is disabled)
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, last id: 42" },
///     "task_queue": { "status": "ok", "message": "Pending: 0/10000" },
///     "cache": { "status": "ok", "message": "redis reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let queue_check = check_task_queue(&state);

    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && queue_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            task_queue: queue_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.health_service.check_store().await {
        Ok(Some(id)) => CheckStatus::ok(format!("Connected, last id: {}", id)),
        Ok(None) => CheckStatus::ok("Connected, no records yet"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

fn check_task_queue(state: &AppState) -> CheckStatus {
    let status = state.health_service.queue_status();
    if status.closed {
        CheckStatus::error("Task queue is closed")
    } else {
        CheckStatus::ok(format!("Pending: {}/{}", status.depth, status.capacity))
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.health_service.cache_backend();
    match state.health_service.ping_cache().await {
        Ok(()) => CheckStatus::ok(format!("{} reachable", backend)),
        Err(e) => CheckStatus::error(format!("{} unreachable: {}", backend, e)),
    }
}

/// Durable store reachability probe.
///
/// # Endpoint
///
/// `GET /health/psql`
///
/// # Response
///
/// ```json
/// { "healthy": true, "last_id": 42 }
/// ```
///
/// # Errors
///
/// Returns 500 if the store cannot be reached.
pub async fn psql_health_handler(
    State(state): State<AppState>,
) -> Result<Json<StoreProbeResponse>, AppError> {
    let last_id = state.health_service.check_store().await?;

    Ok(Json(StoreProbeResponse {
        healthy: true,
        last_id,
    }))
}

/// Cache reachability probe. Requires the API token.
///
/// `GET /health/redis`
pub async fn cache_health_handler(State(state): State<AppState>) -> Json<ProbeResponse> {
    Json(match state.health_service.ping_cache().await {
        Ok(()) => ProbeResponse {
            healthy: true,
            error: None,
        },
        Err(e) => ProbeResponse {
            healthy: false,
            error: Some(e.to_string()),
        },
    })
}

/// Cache write/read round trip probe. Requires the API token.
///
/// `GET /health/redis_rw`
pub async fn cache_rw_health_handler(State(state): State<AppState>) -> Json<ProbeResponse> {
    Json(match state.health_service.cache_round_trip().await {
        Ok(true) => ProbeResponse {
            healthy: true,
            error: None,
        },
        Ok(false) => ProbeResponse {
            healthy: false,
            error: Some("Probe value did not survive the round trip".to_string()),
        },
        Err(e) => ProbeResponse {
            healthy: false,
            error: Some(e.to_string()),
        },
    })
}

/// Dumps every cached alias mapping. Requires the API token.
///
/// `GET /health/redis_data`
///
/// # Errors
///
/// Returns 500 if the cache cannot be scanned.
pub async fn cache_data_handler(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let dump = state.health_service.cache_dump().await.map_err(|e| {
        AppError::internal(
            "Cache scan failed",
            serde_json::json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(Json(dump))
}
