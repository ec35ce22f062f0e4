//! Operational probes of the store, the cache and the task queue.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::background_task::TaskQueue;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheResult, CacheService};

/// Snapshot of the background queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStatus {
    pub closed: bool,
    pub depth: usize,
    pub capacity: usize,
}

/// Runs health probes against the collaborators of the core services.
///
/// Probes never mutate URL records. The cache round trip writes a dedicated
/// short-lived key outside the alias namespace.
pub struct HealthService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    queue: TaskQueue,
}

impl HealthService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        queue: TaskQueue,
    ) -> Self {
        Self {
            repository,
            cache,
            queue,
        }
    }

    /// Reads the highest record id; succeeds on an empty store.
    pub async fn check_store(&self) -> Result<Option<i64>, AppError> {
        self.repository.last_id().await
    }

    pub async fn ping_cache(&self) -> CacheResult<()> {
        self.cache.ping().await
    }

    pub async fn cache_round_trip(&self) -> CacheResult<bool> {
        self.cache.round_trip().await
    }

    /// Every cached mapping, ordered by alias.
    pub async fn cache_dump(&self) -> CacheResult<BTreeMap<String, String>> {
        Ok(self.cache.scan_all().await?.into_iter().collect())
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend()
    }

    pub fn queue_status(&self) -> QueueStatus {
        QueueStatus {
            closed: self.queue.is_closed(),
            depth: self.queue.depth(),
            capacity: self.queue.max_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::background_task::BackgroundTask;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use tokio::sync::mpsc;

    fn service(
        repo: MockUrlRepository,
        cache: MockCacheService,
    ) -> (HealthService, mpsc::Receiver<BackgroundTask>) {
        let (queue, rx) = TaskQueue::new(8);
        (HealthService::new(Arc::new(repo), Arc::new(cache), queue), rx)
    }

    #[tokio::test]
    async fn test_check_store_returns_last_id() {
        let mut repo = MockUrlRepository::new();
        repo.expect_last_id().times(1).returning(|| Ok(Some(42)));

        let (health, _rx) = service(repo, MockCacheService::new());

        assert_eq!(health.check_store().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_check_store_empty_is_healthy() {
        let mut repo = MockUrlRepository::new();
        repo.expect_last_id().times(1).returning(|| Ok(None));

        let (health, _rx) = service(repo, MockCacheService::new());

        assert_eq!(health.check_store().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cache_dump_is_sorted() {
        let mut cache = MockCacheService::new();
        cache.expect_scan_all().times(1).returning(|| {
            Ok(vec![
                ("b".to_string(), "https://b.example".to_string()),
                ("a".to_string(), "https://a.example".to_string()),
            ])
        });

        let (health, _rx) = service(MockUrlRepository::new(), cache);

        let dump = health.cache_dump().await.unwrap();
        let keys: Vec<_> = dump.keys().cloned().collect();

        assert_eq!(keys, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_cache_probe_errors_are_returned() {
        let mut cache = MockCacheService::new();
        cache
            .expect_ping()
            .times(1)
            .returning(|| Err(CacheError::ConnectionError("refused".to_string())));

        let (health, _rx) = service(MockUrlRepository::new(), cache);

        assert!(health.ping_cache().await.is_err());
    }

    #[test]
    fn test_queue_status() {
        let (health, _rx) = service(MockUrlRepository::new(), MockCacheService::new());

        let status = health.queue_status();

        assert!(!status.closed);
        assert_eq!(status.depth, 0);
        assert_eq!(status.capacity, 8);
    }

    #[test]
    fn test_queue_status_closed_without_worker() {
        let (health, rx) = service(MockUrlRepository::new(), MockCacheService::new());
        drop(rx);

        assert!(health.queue_status().closed);
    }
}
