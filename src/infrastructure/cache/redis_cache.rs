//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Key written by [`CacheService::round_trip`]. Lives outside the alias namespace.
const PROBE_KEY: &str = "health:check";
const PROBE_VALUE: &str = "ok";
const PROBE_TTL_SECONDS: u64 = 5;

/// Number of keys requested per SCAN round.
const SCAN_BATCH: usize = 100;

/// Redis cache implementation for fast alias lookups.
///
/// Holds a single long-lived `ConnectionManager`, which is cheap to clone and
/// safe to share across concurrent requests; it reconnects on its own after
/// a dropped connection.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl` - TTL applied when [`CacheService::set_url`] is called with
    ///   `ttl = None`; controlled via `CACHE_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl: Duration) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, alias: &str) -> String {
        format!("{}{}", self.key_prefix, alias)
    }

    /// Collects every key in the alias namespace with cursor-based SCAN.
    async fn scan_keys(&self) -> CacheResult<Vec<String>> {
        let mut conn = self.client.clone();
        let pattern = format!("{}*", self.key_prefix);
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        keys.sort();
        keys.dedup();
        Ok(keys)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, alias: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();

        let value = conn.get::<_, Option<String>>(&key).await?;
        Ok(value)
    }

    async fn set_url(
        &self,
        alias: &str,
        original_url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let key = self.build_key(alias);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl).as_secs().max(1);

        conn.set_ex::<_, _, ()>(&key, original_url, ttl_seconds)
            .await?;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            alias, original_url, ttl_seconds
        );
        Ok(())
    }

    async fn scan_all(&self) -> CacheResult<Vec<(String, String)>> {
        let keys = self.scan_keys().await?;
        let mut conn = self.client.clone();
        let mut entries = Vec::with_capacity(keys.len());

        for chunk in keys.chunks(SCAN_BATCH) {
            // Keys may expire between SCAN and MGET; those come back as nil.
            let values: Vec<Option<String>> = redis::cmd("MGET")
                .arg(chunk)
                .query_async(&mut conn)
                .await?;

            for (key, value) in chunk.iter().zip(values) {
                if let (Some(alias), Some(url)) = (key.strip_prefix(&self.key_prefix), value) {
                    entries.push((alias.to_string(), url));
                }
            }
        }

        Ok(entries)
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.client.clone();
        conn.ping::<()>().await?;
        Ok(())
    }

    async fn round_trip(&self) -> CacheResult<bool> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(PROBE_KEY, PROBE_VALUE, PROBE_TTL_SECONDS)
            .await?;
        let value = conn.get::<_, Option<String>>(PROBE_KEY).await?;

        Ok(value.as_deref() == Some(PROBE_VALUE))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
