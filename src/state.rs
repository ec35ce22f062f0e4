//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AuthService, CreationService, HealthService, ResolutionService,
};
use crate::domain::background_task::TaskQueue;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub creation_service: Arc<CreationService>,
    pub resolution_service: Arc<ResolutionService>,
    pub health_service: Arc<HealthService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires every service around one repository, one cache client and one
    /// task queue.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        queue: TaskQueue,
        base_url: String,
        cache_ttl: Duration,
        api_token: Option<String>,
    ) -> Self {
        Self {
            creation_service: Arc::new(CreationService::new(
                repository.clone(),
                queue.clone(),
                base_url,
                cache_ttl,
            )),
            resolution_service: Arc::new(ResolutionService::new(
                repository.clone(),
                cache.clone(),
                queue.clone(),
                cache_ttl,
            )),
            health_service: Arc::new(HealthService::new(repository, cache, queue)),
            auth_service: Arc::new(AuthService::new(api_token)),
        }
    }
}
