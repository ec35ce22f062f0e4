//! Per-client rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limit layer keyed by peer IP address.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Alias creation: `POST /api/v1.0/minify`.
pub const MINIFY_PER_MINUTE: u32 = 30;

/// API form of resolution: `GET /api/v1.0/{alias}`.
pub const RESOLVE_PER_MINUTE: u32 = 30;

/// Root redirect: `GET /{alias}`.
pub const REDIRECT_PER_MINUTE: u32 = 60;

/// Protected cache reachability probe.
pub const CACHE_PROBE_PER_MINUTE: u32 = 30;

/// Protected cache round-trip probe.
pub const CACHE_RW_PROBE_PER_MINUTE: u32 = 10;

/// Creates a limiter allowing `limit` requests per minute per client.
///
/// A client may spend the whole minute's allowance at once; tokens then
/// refill evenly, one every `60 / limit` seconds.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The client
/// is identified by the socket peer address, so the service must be served
/// with `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/v1.0/minify", post(minify_handler))
///     .layer(rate_limit::per_minute(rate_limit::MINIFY_PER_MINUTE));
/// ```
pub fn per_minute(limit: u32) -> RateLimitLayer {
    let limit = limit.max(1);

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(Duration::from_secs(60) / limit)
            .burst_size(limit)
            .finish()
            .expect("period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
