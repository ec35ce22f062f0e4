//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// These never reach an HTTP client: every call site degrades a failure to a
/// miss or a no-op.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout() {
            CacheError::ConnectionError(e.to_string())
        } else {
            CacheError::OperationError(e.to_string())
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the volatile alias → URL accelerator.
///
/// The cache holds a derived, expendable copy of the durable store. Entries
/// may be absent or evicted at any time; correctness never depends on them.
/// Unlike the durable store, implementations report failures as
/// [`CacheError`] and leave it to the caller to degrade gracefully.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL cached for an alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, alias: &str) -> CacheResult<Option<String>>;

    /// Stores an alias mapping with a TTL.
    ///
    /// `ttl = None` applies the implementation's configured default.
    async fn set_url(&self, alias: &str, original_url: &str, ttl: Option<Duration>)
    -> CacheResult<()>;

    /// Lists every cached `(alias, url)` pair.
    ///
    /// Best-effort and unordered; intended for operational introspection only.
    async fn scan_all(&self) -> CacheResult<Vec<(String, String)>>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> CacheResult<()>;

    /// Writes a short-lived probe key, reads it back and reports whether the
    /// value survived the round trip.
    async fn round_trip(&self) -> CacheResult<bool>;

    /// Short backend name used in health reports.
    fn backend(&self) -> &'static str;
}
