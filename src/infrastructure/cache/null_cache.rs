//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup
/// is a miss, so resolution always falls through to the durable store.
/// Probes succeed: a disabled cache is not an unhealthy one.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _alias: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(
        &self,
        _alias: &str,
        _original_url: &str,
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn scan_all(&self) -> CacheResult<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn round_trip(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
