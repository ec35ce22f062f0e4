//! API route configuration.
//!
//! Public endpoints are rate limited per client IP. The cache probes are
//! additionally protected by Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    cache_data_handler, cache_health_handler, cache_rw_health_handler, health_handler,
    minify_handler, psql_health_handler, resolve_handler,
};
use crate::api::middleware::{auth, rate_limit};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Versioned public API, nested under `/api/v1.0`.
///
/// # Endpoints
///
/// - `POST /minify`   - Allocate an alias (30/min)
/// - `GET  /{alias}`  - Resolve an alias to `{url}` (30/min)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/minify",
            post(minify_handler).layer(rate_limit::per_minute(rate_limit::MINIFY_PER_MINUTE)),
        )
        .route(
            "/{alias}",
            get(resolve_handler).layer(rate_limit::per_minute(rate_limit::RESOLVE_PER_MINUTE)),
        )
}

/// Health probes.
///
/// # Endpoints
///
/// - `GET /health`             - Aggregate status (public)
/// - `GET /health/psql`        - Durable store probe (public)
/// - `GET /health/redis`       - Cache PING (token, 30/min)
/// - `GET /health/redis_rw`    - Cache write/read round trip (token, 10/min)
/// - `GET /health/redis_data`  - Dump of cached mappings (token)
pub fn health_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/health/redis",
            get(cache_health_handler)
                .layer(rate_limit::per_minute(rate_limit::CACHE_PROBE_PER_MINUTE)),
        )
        .route(
            "/health/redis_rw",
            get(cache_rw_health_handler)
                .layer(rate_limit::per_minute(rate_limit::CACHE_RW_PROBE_PER_MINUTE)),
        )
        .route("/health/redis_data", get(cache_data_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route("/health/psql", get(psql_health_handler))
        .merge(protected)
}
