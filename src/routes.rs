//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{alias}`     - Redirect to the original URL (public, 60/min)
//! - `/health*`          - Health probes (see [`crate::api::routes::health_routes`])
//! - `/api/v1.0/*`       - Public REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, per route
//! - **Authentication** - Bearer token on cache probes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds every route with its middleware, without path normalization.
///
/// Rate limiting keys on `ConnectInfo<SocketAddr>`; serve the router with
/// connect info (or a `MockConnectInfo` layer in tests).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{alias}",
            get(redirect_handler).layer(rate_limit::per_minute(rate_limit::REDIRECT_PER_MINUTE)),
        )
        .merge(api::routes::health_routes(state.clone()))
        .nest("/api/v1.0", api::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed from
/// request paths before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
