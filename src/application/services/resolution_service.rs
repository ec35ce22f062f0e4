//! Cache-aside alias resolution.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};

use crate::application::services::ClickTracker;
use crate::domain::background_task::{BackgroundTask, TaskQueue};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Where a resolved URL was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Store,
}

/// A successfully resolved alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub original_url: String,
    pub source: ResolutionSource,
}

/// Resolves aliases through the cache, falling back to the durable store.
///
/// # Algorithm
///
/// 1. Read the cache. A hit is used as is and the cache is not rewritten.
/// 2. On a miss (or a cache failure) read the durable store.
/// 3. After a store hit, schedule a cache repopulation with the configured TTL.
/// 4. On any hit, schedule a click increment.
///
/// Steps 3 and 4 run on the background worker and are not ordered relative
/// to each other or to the response.
pub struct ResolutionService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    queue: TaskQueue,
    clicks: ClickTracker,
    cache_ttl: Duration,
}

impl ResolutionService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        queue: TaskQueue,
        cache_ttl: Duration,
    ) -> Self {
        let clicks = ClickTracker::new(queue.clone());
        Self {
            repository,
            cache,
            queue,
            clicks,
            cache_ttl,
        }
    }

    /// Resolves `alias` to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if neither the cache nor the store knows the alias.
    /// Returns [`AppError::Storage`] if the store read fails after a cache miss.
    pub async fn resolve(&self, alias: &str) -> Result<Resolution, AppError> {
        let cached = match self.cache.get_url(alias).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(alias = %alias, "Cache read failed, falling back to store: {}", e);
                None
            }
        };

        let resolution = match cached {
            Some(original_url) => {
                debug!(alias = %alias, "Cache HIT");
                metrics::counter!("cache_hits_total").increment(1);
                Resolution {
                    original_url,
                    source: ResolutionSource::Cache,
                }
            }
            None => {
                debug!(alias = %alias, "Cache MISS");
                metrics::counter!("cache_misses_total").increment(1);

                let record = self
                    .repository
                    .find_by_alias(alias)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found("Requested url not found", json!({ "alias": alias }))
                    })?;

                self.queue.schedule(BackgroundTask::CacheUrl {
                    alias: record.alias.clone(),
                    original_url: record.original_url.clone(),
                    ttl: Some(self.cache_ttl),
                });

                Resolution {
                    original_url: record.original_url,
                    source: ResolutionSource::Store,
                }
            }
        };

        self.clicks.increment(alias);

        Ok(resolution)
    }
}
