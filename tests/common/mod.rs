#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::Utc;
use miniurl::domain::background_task::{BackgroundTask, TaskQueue};
use miniurl::domain::entities::{NewUrlRecord, UrlRecord};
use miniurl::domain::repositories::UrlRepository;
use miniurl::domain::task_worker::execute_task;
use miniurl::error::AppError;
use miniurl::infrastructure::cache::{CacheError, CacheResult, CacheService};
use miniurl::routes;
use miniurl::state::AppState;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

pub const API_TOKEN: &str = "test-api-token";
pub const BASE_URL: &str = "http://sho.rt";
pub const CACHE_TTL: Duration = Duration::from_secs(86_400);

/// Durable store kept in memory. Alias uniqueness is enforced on insert.
#[derive(Default)]
pub struct InMemoryRepository {
    records: Mutex<Vec<UrlRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryRepository {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn get(&self, alias: &str) -> Option<UrlRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.alias == alias)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn seed(&self, alias: &str, url: &str) {
        let mut records = self.records.lock().unwrap();
        let id = records.len() as i64 + 1;
        records.push(UrlRecord::new(
            id,
            alias.to_string(),
            url.to_string(),
            None,
            Utc::now(),
            0,
        ));
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(AppError::storage("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UrlRepository for InMemoryRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.alias == new_record.alias) {
            return Err(AppError::alias_conflict(new_record.alias));
        }
        let record = UrlRecord::new(
            records.len() as i64 + 1,
            new_record.alias,
            new_record.original_url,
            new_record.description,
            Utc::now(),
            0,
        );
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>, AppError> {
        self.check()?;
        Ok(self.get(alias))
    }

    async fn increment_clicks(&self, alias: &str) -> Result<Option<i64>, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        Ok(records.iter_mut().find(|r| r.alias == alias).map(|r| {
            r.total_clicks += 1;
            r.total_clicks
        }))
    }

    async fn last_id(&self) -> Result<Option<i64>, AppError> {
        self.check()?;
        Ok(self.records.lock().unwrap().iter().map(|r| r.id).max())
    }
}

/// Cache kept in memory. TTLs are recorded but never expire entries.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    ttls: Mutex<HashMap<String, Option<Duration>>>,
    unreachable: AtomicBool,
}

impl InMemoryCache {
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn get(&self, alias: &str) -> Option<String> {
        self.entries.lock().unwrap().get(alias).cloned()
    }

    pub fn ttl(&self, alias: &str) -> Option<Option<Duration>> {
        self.ttls.lock().unwrap().get(alias).cloned()
    }

    pub fn put(&self, alias: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(alias.to_string(), url.to_string());
    }

    fn check(&self) -> CacheResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(CacheError::ConnectionError("Connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, alias: &str) -> CacheResult<Option<String>> {
        self.check()?;
        Ok(self.get(alias))
    }

    async fn set_url(
        &self,
        alias: &str,
        original_url: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        self.check()?;
        self.put(alias, original_url);
        self.ttls.lock().unwrap().insert(alias.to_string(), ttl);
        Ok(())
    }

    async fn scan_all(&self) -> CacheResult<Vec<(String, String)>> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check()
    }

    async fn round_trip(&self) -> CacheResult<bool> {
        self.check()?;
        Ok(true)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Inserts a fixed peer address so per-IP rate limiting can key requests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// A fully wired application backed by in-memory fakes.
///
/// Background tasks are not run automatically; call [`TestApp::settle`] to
/// execute everything queued so far.
pub struct TestApp {
    pub state: AppState,
    pub repository: Arc<InMemoryRepository>,
    pub cache: Arc<InMemoryCache>,
    tasks: mpsc::Receiver<BackgroundTask>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_queue_capacity(100)
    }

    pub fn with_queue_capacity(capacity: usize) -> Self {
        let repository = Arc::new(InMemoryRepository::default());
        let cache = Arc::new(InMemoryCache::default());
        let (queue, tasks) = TaskQueue::new(capacity);

        let state = AppState::new(
            repository.clone(),
            cache.clone(),
            queue,
            BASE_URL.to_string(),
            CACHE_TTL,
            Some(API_TOKEN.to_string()),
        );

        Self {
            state,
            repository,
            cache,
            tasks,
        }
    }

    /// The full router with a mocked peer address.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone()).layer(MockConnectInfoLayer)
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Runs every queued background task and returns them in execution order.
    pub async fn settle(&mut self) -> Vec<BackgroundTask> {
        let mut executed = Vec::new();
        while let Ok(task) = self.tasks.try_recv() {
            execute_task(task.clone(), self.repository.as_ref(), self.cache.as_ref()).await;
            executed.push(task);
        }
        executed
    }

    /// Drops queued tasks without running them.
    pub fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.tasks.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }

    pub fn close_queue(&mut self) {
        self.tasks.close();
    }
}
